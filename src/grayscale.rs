use crate::errors::Result;
use crate::raster::{RasterImage, ReadPolicy, Rgba};

// BT.709-style luma weights. The grayscale value of a color pixel is the
// weighted sum of its channels, rounded to the nearest integer.
const LUMA_WEIGHT_R: f64 = 0.2125;
const LUMA_WEIGHT_G: f64 = 0.7154;
const LUMA_WEIGHT_B: f64 = 0.0721;

/// True iff every pixel satisfies r == g == b. Stops at the first
/// counterexample. Degraded reads count via their zeroed sample.
pub fn is_grayscale(image: &RasterImage) -> bool {
    for y in 0..image.height() {
        for x in 0..image.width() {
            if !image.read_pixel(x, y).value().is_gray() {
                return false;
            }
        }
    }
    true
}

/// Produce a new image of the same dimensions and depth whose every pixel has
/// r = g = b = luma, alpha carried over from the source. Pixels that are
/// already gray are copied through rather than pushed through the float
/// formula, so a grayscale input reproduces its buffer exactly.
pub fn to_grayscale(image: &RasterImage, policy: ReadPolicy) -> Result<RasterImage> {
    let mut out = RasterImage::new(image.width(), image.height(), image.depth())?;
    for y in 0..image.height() {
        for x in 0..image.width() {
            let px = image.read_pixel(x, y).resolve(x, y, policy)?;
            let value = if px.is_gray() { px.r } else { luma(px) };
            out.write_pixel(x, y, Rgba::new(value, value, value, px.a));
        }
    }
    Ok(out)
}

fn luma(px: Rgba) -> u8 {
    let weighted = LUMA_WEIGHT_R * px.r as f64
        + LUMA_WEIGHT_G * px.g as f64
        + LUMA_WEIGHT_B * px.b as f64;
    // clamp, then round to nearest by adding 0.5 before truncation
    (weighted.clamp(0.0, 255.0) + 0.5) as u8
}
