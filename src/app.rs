use eframe::egui;
use rusty_fit::RegressionConfig;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyFitApp {
    pub state: AppState,
}

impl RustyFitApp {
    pub fn new(config: RegressionConfig, startup_error: Option<String>) -> Self {
        let mut state = AppState::new(config);
        if let Some(msg) = startup_error {
            state.set_error(msg);
        }
        Self { state }
    }
}

impl eframe::App for RustyFitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_worker();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: metrics ----
        egui::SidePanel::right("metrics_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::regression_plot(ui, &self.state);
        });
    }
}
