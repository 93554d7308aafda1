//! Image encoders.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use image::{ImageResult, RgbImage};

use crate::renderer::{color_to_bytes, ImageBuffer};

/// Write plain-text PPM (`P3`), one pixel per line, top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_bytes(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

/// Save as a plain-text PPM file.
pub fn save_ppm(image: &ImageBuffer, path: impl AsRef<Path>) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_ppm(image, &mut writer)?;
    writer.flush()
}

/// Save as PNG with the same byte mapping as the PPM output.
pub fn save_png(image: &ImageBuffer, path: impl AsRef<Path>) -> ImageResult<()> {
    let mut img = RgbImage::new(image.width, image.height);
    for (pixel, color) in img.pixels_mut().zip(&image.pixels) {
        pixel.0 = color_to_bytes(*color);
    }
    img.save_with_format(path, image::ImageFormat::Png)
}
