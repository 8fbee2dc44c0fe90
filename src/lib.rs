pub mod app;
pub mod equalize;
pub mod errors;
pub mod grayscale;
pub mod image_loader;
pub mod logging;
pub mod raster;
pub mod ui;
