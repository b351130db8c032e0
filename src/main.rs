#![windows_subsystem = "windows"]
//! Netboot Console - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod backend;
mod constants;
mod controller;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use backend::HttpBackend;
use constants::*;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use utils::{get_data_dir, rasterize_icon};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "netboot-console.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,netboot_console=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

/// Backend client for the configured url, falling back to the default origin
/// when the configured one cannot be used.
fn connect_backend(url: &str) -> backend::BackendResult<(HttpBackend, String)> {
    match HttpBackend::new(url) {
        Ok(backend) => Ok((backend, url.to_string())),
        Err(e) => {
            warn!(error = %e, fallback = DEFAULT_BACKEND_URL, "Unusable backend url");
            Ok((HttpBackend::new(DEFAULT_BACKEND_URL)?, DEFAULT_BACKEND_URL.to_string()))
        }
    }
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Netboot Console starting");

    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(520.0, 480.0)))
        .with_min_inner_size([480.0, 420.0])
        .with_title(APP_NAME);

    if let Some((rgba, width, height)) = rasterize_icon(64) {
        viewport = viewport.with_icon(Arc::new(egui::IconData { rgba, width, height }));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| create_app(cc, settings, data_dir, needs_center)),
    )
}

fn create_app(
    cc: &eframe::CreationContext<'_>,
    settings: settings::Settings,
    data_dir: PathBuf,
    needs_center: bool,
) -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
    let (backend, backend_url) = connect_backend(&settings.effective_backend_url())?;
    info!(backend = %backend.base_url(), "Backend configured");
    let mut app = App::new(cc, Arc::new(backend), backend_url, settings, data_dir)?;
    app.needs_center = needs_center;
    Ok(Box::new(app))
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Page-ready: load the TFTP file list on the first frame
        if !self.init_started {
            self.initialize();
        }

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| self.render_page(ui));
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}
