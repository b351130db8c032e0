//! App module - contains the main application state and logic

mod page;
mod views;

pub use page::{PageHandle, PageState};

use crate::backend::Backend;
use crate::controller::Controller;
use crate::settings::Settings;
use crate::theme;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) page: PageHandle,
    pub(crate) controller: Arc<Controller>,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) backend_url: String,
    pub(crate) backend_url_setting: String,
    pub(crate) init_started: bool,
    // Window geometry, saved on exit
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        backend: Arc<dyn Backend>,
        backend_url: String,
        settings: Settings,
        data_dir: PathBuf,
    ) -> std::io::Result<Self> {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("netboot-request")
            .enable_all()
            .build()?;

        let page = PageHandle::new(PageState::from_settings(&settings), cc.egui_ctx.clone());
        let controller = Arc::new(Controller::new(backend, page.bindings()));

        Ok(Self {
            page,
            controller,
            runtime,
            backend_url,
            backend_url_setting: settings.backend_url.clone(),
            init_started: false,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        })
    }

    /// Page-ready: runs once, on the first frame.
    pub fn initialize(&mut self) {
        if self.init_started {
            return;
        }
        self.init_started = true;
        info!(backend = %self.backend_url, "Loading TFTP file list");
        let controller = self.controller.clone();
        self.runtime.spawn(async move { controller.initialize().await });
    }

    pub fn start_servers(&self) {
        let controller = self.controller.clone();
        self.runtime.spawn(async move {
            controller.start().await;
        });
    }

    pub fn stop_servers(&self) {
        let controller = self.controller.clone();
        self.runtime.spawn(async move {
            controller.stop().await;
        });
    }

    pub fn save_settings(&self) {
        let page = self.page.lock();
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            // an environment override is never written back
            backend_url: self.backend_url_setting.clone(),
            server_ip: page.server_ip.clone(),
            client_ip: page.client_ip.clone(),
            config_filename: page
                .selected_filename()
                .unwrap_or(&page.config_filename)
                .to_string(),
        };
        drop(page);
        settings.save(&self.data_dir);
    }
}
