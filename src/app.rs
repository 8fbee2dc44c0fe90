use crate::equalize::Histogram;
use crate::image_loader;
use crate::raster::RasterImage;
use crate::ui;

use eframe::egui::{self, Color32, TextureHandle};
use std::path::{Path, PathBuf};

/// Fixed destination for the "save current view" command.
pub const OUTPUT_PATH: &str = "output.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Grayscale,
    Equalized,
}

impl ViewMode {
    fn toggled(self) -> Self {
        match self {
            ViewMode::Grayscale => ViewMode::Equalized,
            ViewMode::Equalized => ViewMode::Grayscale,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ViewMode::Grayscale => "Grayscale",
            ViewMode::Equalized => "Equalized",
        }
    }
}

/// Presentation layer. The pipeline runs once before the window opens; this
/// struct only displays the two result images and their histograms, toggles
/// between them, and saves the current view on request.
pub struct LumaViewApp {
    source_path: PathBuf,
    gray: RasterImage,
    equalized: RasterImage,
    gray_histogram: Histogram,
    equalized_histogram: Histogram,
    view_mode: ViewMode,
    gray_texture: Option<TextureHandle>,
    equalized_texture: Option<TextureHandle>,
}

impl LumaViewApp {
    pub fn new(
        source_path: PathBuf,
        gray: RasterImage,
        equalized: RasterImage,
        gray_histogram: Histogram,
        equalized_histogram: Histogram,
    ) -> Self {
        Self {
            source_path,
            gray,
            equalized,
            gray_histogram,
            equalized_histogram,
            view_mode: ViewMode::Grayscale,
            gray_texture: None,
            equalized_texture: None,
        }
    }

    fn texture_for(&mut self, mode: ViewMode, ctx: &egui::Context) -> TextureHandle {
        let (slot, image, name) = match mode {
            ViewMode::Grayscale => (&mut self.gray_texture, &self.gray, "grayscale"),
            ViewMode::Equalized => (&mut self.equalized_texture, &self.equalized, "equalized"),
        };
        slot.get_or_insert_with(|| {
            let rgba = image_loader::to_rgba(image);
            let size = [rgba.width() as usize, rgba.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
            ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
        })
        .clone()
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Space) || i.key_pressed(egui::Key::Tab) {
                self.view_mode = self.view_mode.toggled();
            }
            if i.key_pressed(egui::Key::S) {
                self.save_current_view();
            }
            if i.key_pressed(egui::Key::Escape) {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    /// Save whichever view is on screen as a PNG under the fixed output name.
    /// A failed save is logged and otherwise ignored; the viewer keeps running.
    fn save_current_view(&self) {
        let image = match self.view_mode {
            ViewMode::Grayscale => &self.gray,
            ViewMode::Equalized => &self.equalized,
        };
        match image_loader::save_png(image, Path::new(OUTPUT_PATH)) {
            Ok(()) => log::info!("Saved {} view as '{}'", self.view_mode.label(), OUTPUT_PATH),
            Err(e) => log::error!("{e}"),
        }
    }
}

impl eframe::App for LumaViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);

        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{} — {}x{} — {} view",
                    self.source_path.display(),
                    self.gray.width(),
                    self.gray.height(),
                    self.view_mode.label(),
                ));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label("Space: toggle   S: save   Esc: quit");
                });
            });
        });

        egui::TopBottomPanel::bottom("histograms")
            .exact_height(110.0)
            .show(ctx, |ui| {
                ui.columns(2, |columns| {
                    ui::render_histogram_panel(
                        &mut columns[0],
                        "Original histogram",
                        &self.gray_histogram,
                    );
                    ui::render_histogram_panel(
                        &mut columns[1],
                        "Equalized histogram",
                        &self.equalized_histogram,
                    );
                });
            });

        let texture = self.texture_for(self.view_mode, ctx);
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(Color32::from_gray(20)))
            .show(ctx, |ui| {
                let available = ui.available_size();
                let tex_size = texture.size_vec2();
                // fit to the panel, never upscale past 1:1
                let scale = (available.x / tex_size.x)
                    .min(available.y / tex_size.y)
                    .min(1.0);
                let image_rect =
                    egui::Rect::from_center_size(ui.max_rect().center(), tex_size * scale);
                ui.painter().image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_mode_toggles_between_the_two_views() {
        assert_eq!(ViewMode::Grayscale.toggled(), ViewMode::Equalized);
        assert_eq!(ViewMode::Equalized.toggled(), ViewMode::Grayscale);
    }
}
