use crate::errors::{Result, ViewerError};

/// Bytes-per-pixel of a supported raster format. Constructing one from a raw
/// byte width validates it, so every live `RasterImage` has a depth this enum
/// can actually encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelDepth {
    /// Single luma byte.
    Packed8,
    /// Luma byte plus alpha byte, stored as a native-order u16. Note this is
    /// a gray-oriented layout, not a truncation of the 32-bit color word to
    /// its low 16 bits (which would keep the G/B bytes): on the grayscale
    /// domain the two agree in the low byte, and keeping alpha in the high
    /// byte makes reads round-trip.
    Packed16,
    /// RGB, three bytes in platform byte order (big-endian: R first).
    Packed24,
    /// Full 0xAARRGGBB word, stored in native byte order.
    Packed32,
}

impl PixelDepth {
    pub fn from_bytes_per_pixel(bytes_per_pixel: usize) -> Result<Self> {
        match bytes_per_pixel {
            1 => Ok(PixelDepth::Packed8),
            2 => Ok(PixelDepth::Packed16),
            3 => Ok(PixelDepth::Packed24),
            4 => Ok(PixelDepth::Packed32),
            _ => Err(ViewerError::UnsupportedPixelFormat { bytes_per_pixel }),
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            PixelDepth::Packed8 => 1,
            PixelDepth::Packed16 => 2,
            PixelDepth::Packed24 => 3,
            PixelDepth::Packed32 => 4,
        }
    }
}

/// One pixel sample. A pixel is gray iff r == g == b; alpha does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    pub fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    fn pack(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    fn unpack(word: u32) -> Self {
        Rgba {
            r: (word >> 16) as u8,
            g: (word >> 8) as u8,
            b: word as u8,
            a: (word >> 24) as u8,
        }
    }
}

/// Result of reading one pixel. A `Degraded` sample means the pixel's bytes
/// could not be read (e.g. the producer handed over a truncated buffer); it
/// carries a zeroed best-effort value so callers may continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    Exact(Rgba),
    Degraded(Rgba),
}

impl Sample {
    pub fn value(self) -> Rgba {
        match self {
            Sample::Exact(px) | Sample::Degraded(px) => px,
        }
    }

    pub fn is_degraded(self) -> bool {
        matches!(self, Sample::Degraded(_))
    }

    /// Apply the caller's degraded-read policy: under `Continue` a degraded
    /// sample is logged and used as-is, under `Abort` it becomes an error.
    pub fn resolve(self, x: u32, y: u32, policy: ReadPolicy) -> Result<Rgba> {
        match (self, policy) {
            (Sample::Exact(px), _) => Ok(px),
            (Sample::Degraded(px), ReadPolicy::Continue) => {
                log::warn!("Unreadable pixel at ({x}, {y}); continuing with a default sample");
                Ok(px)
            }
            (Sample::Degraded(_), ReadPolicy::Abort) => Err(ViewerError::DegradedRead { x, y }),
        }
    }
}

/// What a pixel loop does when it hits an unreadable pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadPolicy {
    Continue,
    Abort,
}

/// An owned pixel buffer addressable by (x, y).
///
/// Invariants kept by the constructors: width > 0, height > 0, and
/// `pitch >= width * depth.bytes()`. `data` normally covers `pitch * height`
/// bytes; `from_raw_parts` tolerates a shorter buffer, in which case pixels
/// past the end read as degraded samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    depth: PixelDepth,
    pitch: usize,
    data: Vec<u8>,
}

impl RasterImage {
    /// Allocate a zeroed image buffer. Zero dimensions and size overflow are
    /// allocation failures.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ViewerError::Allocation { width, height });
        }
        let pitch = (width as usize)
            .checked_mul(depth.bytes())
            .ok_or(ViewerError::Allocation { width, height })?;
        let len = pitch
            .checked_mul(height as usize)
            .ok_or(ViewerError::Allocation { width, height })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ViewerError::Allocation { width, height })?;
        data.resize(len, 0);

        Ok(RasterImage { width, height, depth, pitch, data })
    }

    /// Wrap an existing buffer. `pitch` may exceed the packed row width (row
    /// padding), and `data` may be shorter than `pitch * height` when the
    /// producer delivered a truncated buffer; such pixels read as degraded.
    pub fn from_raw_parts(
        width: u32,
        height: u32,
        depth: PixelDepth,
        pitch: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        let min_pitch = (width as usize).checked_mul(depth.bytes());
        if width == 0 || height == 0 || min_pitch.is_none_or(|min| pitch < min) {
            return Err(ViewerError::Allocation { width, height });
        }
        Ok(RasterImage { width, height, depth, pitch, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> PixelDepth {
        self.depth
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        debug_assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of range");
        (y as usize)
            .checked_mul(self.pitch)
            .and_then(|row| row.checked_add(x as usize * self.depth.bytes()))
    }

    /// Read the pixel at (x, y). Out-of-range coordinates are a caller bug;
    /// a pixel whose bytes fall outside the buffer yields a degraded sample.
    pub fn read_pixel(&self, x: u32, y: u32) -> Sample {
        let bytes = self.depth.bytes();
        let raw = self.offset(x, y).and_then(|start| {
            let end = start.checked_add(bytes)?;
            self.data.get(start..end)
        });
        let Some(raw) = raw else {
            return Sample::Degraded(Rgba::TRANSPARENT);
        };

        let px = match self.depth {
            PixelDepth::Packed8 => {
                let v = raw[0];
                Rgba::new(v, v, v, 0xFF)
            }
            PixelDepth::Packed16 => {
                let word = u16::from_ne_bytes([raw[0], raw[1]]);
                let v = word as u8;
                Rgba::new(v, v, v, (word >> 8) as u8)
            }
            PixelDepth::Packed24 => {
                if cfg!(target_endian = "big") {
                    Rgba::new(raw[0], raw[1], raw[2], 0xFF)
                } else {
                    Rgba::new(raw[2], raw[1], raw[0], 0xFF)
                }
            }
            PixelDepth::Packed32 => {
                Rgba::unpack(u32::from_ne_bytes([raw[0], raw[1], raw[2], raw[3]]))
            }
        };
        Sample::Exact(px)
    }

    /// Write the pixel at (x, y), encoding per the image's byte width. On a
    /// truncated buffer a write past the end is skipped.
    pub fn write_pixel(&mut self, x: u32, y: u32, px: Rgba) {
        let bytes = self.depth.bytes();
        let word = px.pack();
        let offset = self.offset(x, y);
        let raw = offset.and_then(|start| {
            let end = start.checked_add(bytes)?;
            self.data.get_mut(start..end)
        });
        let Some(raw) = raw else {
            return;
        };

        match self.depth {
            PixelDepth::Packed8 => raw[0] = word as u8,
            PixelDepth::Packed16 => {
                let narrow = ((px.a as u16) << 8) | (word & 0xFF) as u16;
                raw.copy_from_slice(&narrow.to_ne_bytes());
            }
            PixelDepth::Packed24 => {
                if cfg!(target_endian = "big") {
                    raw[0] = (word >> 16) as u8;
                    raw[1] = (word >> 8) as u8;
                    raw[2] = word as u8;
                } else {
                    raw[0] = word as u8;
                    raw[1] = (word >> 8) as u8;
                    raw[2] = (word >> 16) as u8;
                }
            }
            PixelDepth::Packed32 => raw.copy_from_slice(&word.to_ne_bytes()),
        }
    }
}
