//! Global histogram equalization over a grayscale image: histogram, CDF
//! normalization into a lookup table, and per-pixel remapping.

use crate::errors::Result;
use crate::raster::{RasterImage, ReadPolicy, Rgba};

/// Number of representable 8-bit intensity levels. The equalization formula
/// below is specific to this range; do not generalize it.
pub const INTENSITY_LEVELS: usize = 256;

/// Per-level frequency counts. For a W×H source the counts sum to W×H.
pub type Histogram = [u32; INTENSITY_LEVELS];

/// Intensity remapping table; non-decreasing when built from a CDF.
pub type Lut = [u8; INTENSITY_LEVELS];

/// Count luma occurrences over a grayscale image.
///
/// Precondition: the input is grayscale (r == g == b everywhere), so counting
/// the red channel suffices. Checked in debug builds only; re-scanning the
/// whole image in release would double the cost of the hot loop.
pub fn histogram(image: &RasterImage) -> Histogram {
    debug_assert!(
        crate::grayscale::is_grayscale(image),
        "histogram input must be grayscale"
    );
    let mut hist = [0u32; INTENSITY_LEVELS];
    for y in 0..image.height() {
        for x in 0..image.width() {
            hist[image.read_pixel(x, y).value().r as usize] += 1;
        }
    }
    hist
}

/// Build the equalization lookup table from a histogram.
///
/// Classic CDF normalization: prefix-sum the bins, subtract the CDF value at
/// the darkest occupied level, and stretch what remains across [0, 255] with
/// round-to-nearest. A single-solid-color image (total <= cdf_min) has
/// nothing to stretch and gets the identity table instead of a division by
/// zero.
pub fn build_lut(hist: &Histogram, total_pixels: u64) -> Lut {
    let mut cdf = [0u64; INTENSITY_LEVELS];
    let mut acc = 0u64;
    for (i, &count) in hist.iter().enumerate() {
        acc += count as u64;
        cdf[i] = acc;
    }

    // CDF value at the lowest intensity with a non-zero count
    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);

    let mut lut = [0u8; INTENSITY_LEVELS];
    if total_pixels <= cdf_min {
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = i as u8;
        }
        return lut;
    }

    let denom = (total_pixels - cdf_min) as f64;
    for (i, entry) in lut.iter_mut().enumerate() {
        let stretched = 255.0 * cdf[i].saturating_sub(cdf_min) as f64 / denom;
        *entry = stretched.round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Remap every pixel of a grayscale image through `lut`, alpha preserved.
/// Returns a fresh buffer of the same dimensions and depth.
pub fn apply_lut(image: &RasterImage, lut: &Lut, policy: ReadPolicy) -> Result<RasterImage> {
    let mut out = RasterImage::new(image.width(), image.height(), image.depth())?;
    for y in 0..image.height() {
        for x in 0..image.width() {
            let px = image.read_pixel(x, y).resolve(x, y, policy)?;
            let mapped = lut[px.r as usize];
            out.write_pixel(x, y, Rgba::new(mapped, mapped, mapped, px.a));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelDepth;

    fn gray_image(width: u32, height: u32, values: &[u8]) -> RasterImage {
        let mut img = RasterImage::new(width, height, PixelDepth::Packed32).unwrap();
        for (i, &v) in values.iter().enumerate() {
            img.write_pixel(i as u32 % width, i as u32 / width, Rgba::new(v, v, v, 255));
        }
        img
    }

    #[test]
    fn histogram_counts_sum_to_pixel_count() {
        let values: Vec<u8> = (0..100).map(|i| (i * 37 % 256) as u8).collect();
        let img = gray_image(10, 10, &values);
        let hist = histogram(&img);
        let total: u64 = hist.iter().map(|&c| c as u64).sum();
        assert_eq!(total, img.pixel_count());
    }

    #[test]
    fn two_by_two_round_trip() {
        // pixels 10, 10, 200, 200: cdf[10..200] = 2, cdf[200..] = 4, cdf_min = 2
        let img = gray_image(2, 2, &[10, 10, 200, 200]);
        assert!(crate::grayscale::is_grayscale(&img));

        let hist = histogram(&img);
        assert_eq!(hist[10], 2);
        assert_eq!(hist[200], 2);
        assert_eq!(hist.iter().filter(|&&c| c != 0).count(), 2);

        let lut = build_lut(&hist, 4);
        assert_eq!(lut[10], 0); // round(255 * (2-2) / (4-2))
        assert_eq!(lut[200], 255); // round(255 * (4-2) / (4-2))

        let out = apply_lut(&img, &lut, ReadPolicy::Continue).unwrap();
        assert_eq!(out.read_pixel(0, 0).value(), Rgba::new(0, 0, 0, 255));
        assert_eq!(out.read_pixel(1, 0).value(), Rgba::new(0, 0, 0, 255));
        assert_eq!(out.read_pixel(0, 1).value(), Rgba::new(255, 255, 255, 255));
        assert_eq!(out.read_pixel(1, 1).value(), Rgba::new(255, 255, 255, 255));
    }

    #[test]
    fn solid_color_gets_identity_lut() {
        let img = gray_image(10, 10, &[128; 100]);
        let lut = build_lut(&histogram(&img), img.pixel_count());
        for (i, &entry) in lut.iter().enumerate() {
            assert_eq!(entry as usize, i);
        }
    }

    #[test]
    fn empty_histogram_does_not_divide_by_zero() {
        let hist = [0u32; INTENSITY_LEVELS];
        let lut = build_lut(&hist, 0);
        assert_eq!(lut[0], 0);
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn lut_is_in_range_and_non_decreasing() {
        let values: Vec<u8> = (0..(64 * 64)).map(|i| (i * 7 % 251) as u8).collect();
        let img = gray_image(64, 64, &values);
        let lut = build_lut(&histogram(&img), img.pixel_count());
        for pair in lut.windows(2) {
            assert!(pair[1] >= pair[0], "lut must be non-decreasing");
        }
    }

    #[test]
    fn equalization_spreads_a_low_contrast_image() {
        // all luma confined to [100, 120]
        let values: Vec<u8> = (0..(32 * 32)).map(|i| 100 + (i % 21) as u8).collect();
        let img = gray_image(32, 32, &values);

        let hist = histogram(&img);
        let lut = build_lut(&hist, img.pixel_count());
        let out = apply_lut(&img, &lut, ReadPolicy::Continue).unwrap();
        let out_hist = histogram(&out);

        let occupied_range = |h: &Histogram| {
            let lo = h.iter().position(|&c| c > 0).unwrap();
            let hi = h.iter().rposition(|&c| c > 0).unwrap();
            hi - lo
        };
        assert_eq!(occupied_range(&hist), 20);
        assert!(occupied_range(&out_hist) > 200, "equalized histogram should span most of [0, 255]");
        // conservation holds for the remapped image too
        let total: u64 = out_hist.iter().map(|&c| c as u64).sum();
        assert_eq!(total, img.pixel_count());
    }

    #[test]
    fn apply_lut_preserves_alpha() {
        let mut img = RasterImage::new(1, 1, PixelDepth::Packed32).unwrap();
        img.write_pixel(0, 0, Rgba::new(10, 10, 10, 99));
        let mut lut = [0u8; INTENSITY_LEVELS];
        lut[10] = 250;
        let out = apply_lut(&img, &lut, ReadPolicy::Continue).unwrap();
        assert_eq!(out.read_pixel(0, 0).value(), Rgba::new(250, 250, 250, 99));
    }
}
