//! Reusable UI components

use crate::theme;
use crate::types::{StatusKind, StatusMessage};
use eframe::egui;

/// Caption above a form control
pub fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(theme::FONT_LABEL)
            .color(theme::TEXT_MUTED),
    );
}

/// Full-width single line text input with a caption
pub fn labeled_text_field(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    hint: &str,
) -> egui::Response {
    field_label(ui, label);
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    )
}

/// Icon and color for a status kind, mirroring the page's `status error` class
pub fn status_style(kind: StatusKind) -> (&'static str, egui::Color32) {
    if kind.is_error() {
        (egui_phosphor::regular::WARNING_CIRCLE, theme::STATUS_ERROR)
    } else {
        (egui_phosphor::regular::CHECK_CIRCLE, theme::STATUS_SUCCESS)
    }
}

/// Render the status line
pub fn status_banner(ui: &mut egui::Ui, status: &StatusMessage) {
    let (icon, color) = status_style(status.kind);
    theme::status_frame(color).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal_wrapped(|ui| {
            ui.colored_label(color, icon);
            ui.label(egui::RichText::new(status.text.as_str()).color(theme::TEXT_PRIMARY));
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_uses_error_color() {
        let (_, color) = status_style(StatusMessage::error("x").kind);
        assert_eq!(color, theme::STATUS_ERROR);
        let (_, color) = status_style(StatusMessage::success("x").kind);
        assert_eq!(color, theme::STATUS_SUCCESS);
    }
}
