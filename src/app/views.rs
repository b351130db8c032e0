//! Page rendering: server form, action buttons, status line

use super::page::PageState;
use super::App;
use crate::constants::*;
use crate::theme;
use crate::types::{ActionPhase, ServerAction};
use crate::ui::components::{field_label, labeled_text_field, status_banner};
use eframe::egui;
use egui_phosphor::regular::{PLAY, STOP};

#[derive(Default)]
struct Clicks {
    start: bool,
    stop: bool,
}

impl App {
    pub(crate) fn render_page(&mut self, ui: &mut egui::Ui) {
        let busy = [ServerAction::Start, ServerAction::Stop]
            .into_iter()
            .any(|action| self.controller.phase(action) == ActionPhase::Pending);
        let clicks = {
            let mut page = self.page.lock();
            ui.vertical_centered(|ui| {
                ui.add_space(theme::SPACING_XL);
                ui.label(
                    egui::RichText::new(APP_NAME)
                        .size(theme::FONT_TITLE)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                ui.label(
                    egui::RichText::new(format!("Backend: {}", self.backend_url))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_MUTED),
                );
                ui.add_space(theme::SPACING_LG);

                ui.allocate_ui(egui::vec2(theme::CARD_WIDTH, 0.0), |ui| {
                    theme::card_frame()
                        .show(ui, |ui| render_card(ui, &mut page, busy))
                        .inner
                })
                .inner
            })
            .inner
        };
        // page lock released before handing off to the runtime

        if clicks.start {
            self.start_servers();
        }
        if clicks.stop {
            self.stop_servers();
        }
    }
}

fn render_card(ui: &mut egui::Ui, page: &mut PageState, busy: bool) -> Clicks {
    ui.set_width(theme::CARD_WIDTH);
    ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
        ui.push_id(SERVER_FORM_ID, |ui| {
            labeled_text_field(ui, "Server IP", &mut page.server_ip, DEFAULT_SERVER_IP);
            ui.add_space(theme::SPACING_SM);
            labeled_text_field(ui, "Client IP", &mut page.client_ip, DEFAULT_CLIENT_IP);
            ui.add_space(theme::SPACING_SM);
            render_config_select(ui, page);
        });

        ui.add_space(theme::SPACING_LG);
        let clicks = render_buttons(ui, page);
        if busy {
            ui.add_space(theme::SPACING_SM);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(
                    egui::RichText::new("Waiting for backend...")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_MUTED),
                );
            });
        }

        if let Some(status) = &page.status {
            ui.add_space(theme::SPACING_LG);
            ui.push_id(STATUS_ID, |ui| status_banner(ui, status));
        }
        clicks
    })
    .inner
}

fn render_config_select(ui: &mut egui::Ui, page: &mut PageState) {
    field_label(ui, "Config file");
    let selected = page.selected_filename().map(str::to_owned);
    let options = page.config_options.clone();
    egui::ComboBox::from_id_salt(CONFIG_SELECT_ID)
        .width(ui.available_width())
        .selected_text(selected.as_deref().unwrap_or("No files available"))
        .show_ui(ui, |ui| {
            for option in &options {
                let is_selected = selected.as_deref() == Some(option.as_str());
                if ui.selectable_label(is_selected, option.as_str()).clicked() {
                    page.config_filename = option.clone();
                }
            }
        });
}

fn render_buttons(ui: &mut egui::Ui, page: &PageState) -> Clicks {
    let size = egui::vec2(
        (theme::CARD_WIDTH - theme::SPACING_MD) / 2.0,
        theme::BUTTON_HEIGHT_LARGE,
    );
    let mut clicks = Clicks::default();
    ui.horizontal(|ui| {
        clicks.start = ui
            .push_id(START_BUTTON_ID, |ui| {
                ui.add_enabled(
                    page.start_enabled,
                    theme::button_accent(format!("{PLAY}  Start servers")).min_size(size),
                )
            })
            .inner
            .clicked();
        clicks.stop = ui
            .push_id(STOP_BUTTON_ID, |ui| {
                ui.add_enabled(
                    page.stop_enabled,
                    theme::button_danger(format!("{STOP}  Stop servers")).min_size(size),
                )
            })
            .inner
            .clicked();
    });
    clicks
}
