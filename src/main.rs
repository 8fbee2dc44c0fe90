use std::path::PathBuf;
use std::process::ExitCode;

use eframe::egui;
use lumaview::app::LumaViewApp;
use lumaview::errors::{Result, ViewerError};
use lumaview::raster::ReadPolicy;
use lumaview::{equalize, grayscale, image_loader, logging};

fn main() -> ExitCode {
    logging::init_tracing();

    let path = match parse_args(std::env::args().skip(1)) {
        Ok(path) => path,
        Err(usage) => {
            eprintln!("{usage}");
            return ExitCode::FAILURE;
        }
    };

    match run(path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// The only accepted invocation is a single input-image path.
fn parse_args(mut args: impl Iterator<Item = String>) -> std::result::Result<PathBuf, String> {
    let usage = format!("Usage: {} <path-to-image>", env!("CARGO_PKG_NAME"));
    match (args.next(), args.next()) {
        (Some(path), None) => Ok(PathBuf::from(path)),
        _ => Err(usage),
    }
}

fn run(path: PathBuf) -> Result<()> {
    let source = image_loader::load_image(&path)?;
    log::info!(
        "Loaded '{}': {}x{} pixels, {} bytes per pixel",
        path.display(),
        source.width(),
        source.height(),
        source.depth().bytes(),
    );

    // The whole pipeline runs once, up front; the viewer only displays the
    // results.
    let span = tracing::info_span!("pipeline", path = %path.display()).entered();
    let gray = if grayscale::is_grayscale(&source) {
        log::info!("Image is already grayscale");
        source.clone()
    } else {
        log::info!("Converting image to grayscale");
        grayscale::to_grayscale(&source, ReadPolicy::Continue)?
    };

    let gray_histogram = equalize::histogram(&gray);
    let lut = equalize::build_lut(&gray_histogram, gray.pixel_count());
    let equalized = equalize::apply_lut(&gray, &lut, ReadPolicy::Continue)?;
    let equalized_histogram = equalize::histogram(&equalized);
    drop(span);

    let app = LumaViewApp::new(path, gray, equalized, gray_histogram, equalized_histogram);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([480.0, 360.0])
            .with_icon(load_icon()),
        ..Default::default()
    };

    eframe::run_native(
        "lumaview",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| ViewerError::Gui { message: e.to_string() })
}

fn load_icon() -> egui::IconData {
    // Programmatic icon: a horizontal grayscale ramp inside a disc
    let size = 64usize;
    let mut rgba = vec![0u8; size * size * 4];

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let cx = x as f32 - size as f32 / 2.0;
            let cy = y as f32 - size as f32 / 2.0;
            let dist = (cx * cx + cy * cy).sqrt();

            if dist < size as f32 / 2.0 - 2.0 {
                let level = (x as f32 / (size - 1) as f32 * 255.0) as u8;
                rgba[idx] = level;
                rgba[idx + 1] = level;
                rgba[idx + 2] = level;
                rgba[idx + 3] = 255;
            }
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}
