//! Textures: surface colour as a function of `(u, v)` and hit point.

use std::path::Path;
use std::sync::Arc;

use lumen_math::{Color, Interval, Point3};
use thiserror::Error;

/// Colour returned by an image texture that holds no pixels.
pub const MISSING_TEXTURE_COLOR: Color = Color::new(0.0, 1.0, 1.0);

/// Errors raised while building an image texture.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Pixel buffer holds {actual} bytes, expected {expected} for RGB8")]
    BufferSize { expected: usize, actual: usize },

    #[error("Image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Maps a surface coordinate to a colour.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Point3) -> Color;
}

/// A single constant colour.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn from_rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(Color::new(red, green, blue))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Point3) -> Color {
        self.albedo
    }
}

/// Procedural 3-D checkerboard alternating between two textures.
///
/// Cells are cubes of side `scale` in world space; a point picks `even`
/// when the sum of its floored cell coordinates is even.
#[derive(Clone)]
pub struct CheckerTexture {
    inv_scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    /// Checkerboard of two solid colours.
    pub fn from_colors(scale: f32, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Point3) -> Color {
        let cell = (self.inv_scale * p).floor();
        // Per-axis parity; casts saturate for far points or tiny cells
        let parity = (cell.x as i64).rem_euclid(2)
            + (cell.y as i64).rem_euclid(2)
            + (cell.z as i64).rem_euclid(2);

        if parity % 2 == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Nearest-neighbour lookup into a decoded RGB8 image.
///
/// `v = 0` is the bottom row of the image. A texture without pixel data
/// samples as [`MISSING_TEXTURE_COLOR`].
#[derive(Clone, Debug, Default)]
pub struct ImageTexture {
    width: u32,
    height: u32,
    /// Row-major RGB, three bytes per pixel
    data: Vec<u8>,
}

impl ImageTexture {
    /// Wrap an already decoded RGB8 buffer.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(TextureError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Decode an image file into a texture.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let rgb = image::load_from_memory(&bytes)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        log::debug!("Loaded texture: {} ({}x{})", path.display(), width, height);

        Self::from_rgb8(width, height, rgb.into_raw())
    }

    /// A texture with no pixel data.
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        let idx = (y * self.width as usize + x) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Point3) -> Color {
        if !self.has_data() {
            return MISSING_TEXTURE_COLOR;
        }

        let unit = Interval::new(0.0, 1.0);
        let u = unit.clamp(u);
        // Image rows run top to bottom
        let v = 1.0 - unit.clamp(v);

        let i = (u * self.width as f32) as u32;
        let j = (v * self.height as f32) as u32;
        let [r, g, b] = self.pixel(i, j);

        let color_scale = 1.0 / 255.0;
        Color::new(
            color_scale * r as f32,
            color_scale * g as f32,
            color_scale * b as f32,
        )
    }
}
