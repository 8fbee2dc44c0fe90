use crate::errors::{Result, ViewerError};
use crate::raster::{PixelDepth, RasterImage, Rgba};
use image::RgbaImage;
use std::path::Path;

/// Decode an image file into an owned raster buffer. Every decoded image is
/// normalized to RGBA8888 (4 bytes per pixel); the pipeline treats it
/// uniformly regardless of the on-disk format.
pub fn load_image(path: &Path) -> Result<RasterImage> {
    if !path.exists() {
        return Err(ViewerError::FileNotFound { path: path.to_path_buf() });
    }

    let decoded = image::open(path).map_err(|e| ViewerError::ImageLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    from_rgba(&decoded.to_rgba8())
}

fn from_rgba(rgba: &RgbaImage) -> Result<RasterImage> {
    let mut raster = RasterImage::new(rgba.width(), rgba.height(), PixelDepth::Packed32)?;
    for (x, y, px) in rgba.enumerate_pixels() {
        raster.write_pixel(x, y, Rgba::new(px[0], px[1], px[2], px[3]));
    }
    Ok(raster)
}

/// Expand a raster image back into an RGBA8888 buffer for display or encode.
pub fn to_rgba(image: &RasterImage) -> RgbaImage {
    let mut out = RgbaImage::new(image.width(), image.height());
    for y in 0..image.height() {
        for x in 0..image.width() {
            let px = image.read_pixel(x, y).value();
            out.put_pixel(x, y, image::Rgba([px.r, px.g, px.b, px.a]));
        }
    }
    out
}

/// Persist an image as a PNG at `path`.
pub fn save_png(image: &RasterImage, path: &Path) -> Result<()> {
    to_rgba(image).save(path).map_err(|e| ViewerError::Export {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
