//! Plain (P3) PPM serializer.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use lumen_renderer::ImageBuffer;

/// Save `image` to `path`, or to stdout when `path` is `-`.
pub fn save_ppm(image: &ImageBuffer, path: &str) -> io::Result<()> {
    if path == "-" {
        let stdout = io::stdout();
        write_ppm(image, BufWriter::new(stdout.lock()))
    } else {
        write_ppm(image, BufWriter::new(File::create(path)?))
    }
}

/// Write `image` as an ASCII PPM, one `r g b` line per pixel.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut out: W) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;

    for [r, g, b] in image.to_rgb8() {
        writeln!(out, "{} {} {}", r, g, b)?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_renderer::Color;

    #[test]
    fn test_rows_are_top_first() {
        let mut image = ImageBuffer::new(1, 2);
        image.set(0, 0, Color::new(1.0, 0.0, 0.0));

        let mut bytes = Vec::new();
        write_ppm(&image, &mut bytes).unwrap();

        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[3], "255 0 0");
        assert_eq!(lines[4], "0 0 0");
    }

    #[test]
    fn test_save_ppm_to_file() {
        let path = std::env::temp_dir().join("lumen_ppm_test.ppm");
        let image = ImageBuffer::new(3, 2);

        save_ppm(&image, path.to_str().unwrap()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(text.starts_with("P3\n3 2\n255\n"));
        assert_eq!(text.lines().count(), 3 + 6);
    }

    #[test]
    fn test_write_ppm() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(1, 0, Color::ONE);

        let mut bytes = Vec::new();
        write_ppm(&image, &mut bytes).unwrap();

        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n0 0 0\n255 255 255\n");
    }
}
