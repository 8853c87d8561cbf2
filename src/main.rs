mod app;
mod color;
mod state;
mod ui;

use app::RustyFitApp;
use eframe::egui;
use rusty_fit::RegressionConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let (config, startup_error) = match RegressionConfig::load() {
        Ok(config) => (config, None),
        Err(e) => {
            log::error!("{e}; falling back to built-in defaults");
            (RegressionConfig::default(), Some(format!("Error: {e}")))
        }
    };
    log::debug!("config: {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Fit – CSV Linear Regression",
        options,
        Box::new(|_cc| Ok(Box::new(RustyFitApp::new(config, startup_error)))),
    )
}
