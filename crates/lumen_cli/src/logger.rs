use env_logger::{Builder, Env};
use log::LevelFilter;

/// Level used when neither RUST_LOG nor `--log-level` is given.
const DEFAULT_FILTER: &str = "info";

/// Logger reading its filter from `env`, with `level` taking precedence.
fn builder(env: Env<'_>, level: Option<LevelFilter>) -> Builder {
    let mut builder = Builder::from_env(env);
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder
}

/// Initialize the global logger from RUST_LOG and the optional CLI level.
pub fn init_logger(level: Option<LevelFilter>) {
    builder(Env::default().default_filter_or(DEFAULT_FILTER), level).init();
}
