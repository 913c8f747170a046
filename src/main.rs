mod app;
mod config;
mod error;
mod files;

use app::ExamAi;
use config::{AppConfig, MIN_WINDOW_SIZE};
use error::AppError;
use tracing_subscriber::EnvFilter;

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), AppError> {
    let (config, config_error) = match config::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&config.log_level);

    if let Some(e) = config_error {
        tracing::warn!(
            event = "ui.config.load_failed",
            error = %e,
            "Using default configuration"
        );
    }

    let palette = config.theme.palette()?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Exam AI")
            .with_inner_size(config.window.inner_size())
            .with_min_inner_size([MIN_WINDOW_SIZE, MIN_WINDOW_SIZE]),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        "Exam AI",
        options,
        Box::new(move |cc: &eframe::CreationContext<'_>| {
            Box::new(ExamAi::new(cc, palette))
        }),
    )?;

    tracing::info!(event = "ui.app.closed");
    Ok(())
}
