use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to load image '{path}': {message}")]
    ImageLoad { path: PathBuf, message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to allocate a {width}x{height} image buffer")]
    Allocation { width: u32, height: u32 },

    #[error("Unsupported pixel format: {bytes_per_pixel} bytes per pixel")]
    UnsupportedPixelFormat { bytes_per_pixel: usize },

    #[error("Unreadable pixel at ({x}, {y})")]
    DegradedRead { x: u32, y: u32 },

    #[error("Failed to save '{path}': {message}")]
    Export { path: PathBuf, message: String },

    #[error("Window error: {message}")]
    Gui { message: String },
}

pub type Result<T> = std::result::Result<T, ViewerError>;
