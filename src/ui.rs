use crate::equalize::{Histogram, INTENSITY_LEVELS};
use egui::{self, Color32, CornerRadius, RichText, Stroke, Vec2};

const PANEL_BG: Color32 = Color32::from_rgb(34, 34, 34);
const LABEL_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

/// Paint a 256-bin luma histogram as a bar panel. Bar heights use a sqrt
/// scale so sparse bins stay visible next to dominant peaks.
pub fn render_histogram_panel(ui: &mut egui::Ui, title: &str, histogram: &Histogram) {
    ui.vertical(|ui| {
        ui.label(RichText::new(title).size(11.0).color(LABEL_COLOR).strong());

        let height = 80.0;
        let (response, painter) =
            ui.allocate_painter(Vec2::new(ui.available_width(), height), egui::Sense::hover());
        let rect = response.rect;

        painter.rect_filled(rect, CornerRadius::same(2), PANEL_BG);

        let max_count = histogram.iter().copied().max().unwrap_or(0).max(1) as f32;
        let w = rect.width() - 4.0;
        let h = rect.height() - 4.0;
        let base_y = rect.bottom() - 2.0;

        for (i, &count) in histogram.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let x = rect.left() + 2.0 + (i as f32 / (INTENSITY_LEVELS - 1) as f32) * w;
            let bar = (count as f32 / max_count).sqrt() * h;
            painter.line_segment(
                [egui::pos2(x, base_y), egui::pos2(x, base_y - bar)],
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(200, 200, 200, 160)),
            );
        }
    });
}
