use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, Grid, RichText, Ui};

use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Right side panel – metrics
// ---------------------------------------------------------------------------

/// Render the metrics panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Metrics");
    ui.separator();

    let Some(run) = &state.run else {
        ui.label("No regression yet.");
        return;
    };

    Grid::new("metrics_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.strong("Variables");
            ui.label(format!("X = {}, Y = {}", run.selection.x, run.selection.y));
            ui.end_row();

            ui.strong("MSE");
            ui.label(format!("{:.4}", run.metrics.mse));
            ui.end_row();

            ui.strong("MAE");
            ui.label(format!("{:.4}", run.metrics.mae));
            ui.end_row();

            ui.strong("R²");
            ui.label(format!("{:.4}", run.metrics.r2));
            ui.end_row();

            ui.strong("Points");
            ui.label(format!("{} of {} rows", run.sample.len(), run.rows));
            ui.end_row();

            ui.strong("Line (normalized)");
            ui.label(format!("{:.4} x + {:.4}", run.line.weight, run.line.bias));
            ui.end_row();

            ui.strong("Final loss");
            ui.label(format!("{:.6}", run.line.loss));
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.strong("Training loss");
    plot::loss_plot(ui, run);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui
                .add_enabled(!state.loading, egui::Button::new("Open CSV…"))
                .clicked()
            {
                open_file_dialog(ui.ctx(), state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.run.is_some(), egui::Button::new("Export report…"))
                .clicked()
            {
                export_report_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let default_path = state.config.data.path.clone();
        let label = format!("Load & fit {}", default_path.display());
        if ui
            .add_enabled(!state.loading, egui::Button::new(label))
            .clicked()
        {
            state.start_run(default_path, ui.ctx());
        }

        if state.loading {
            ui.spinner();
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            let text = RichText::new(msg);
            if state.status_is_error {
                ui.label(text.color(Color32::RED));
            } else {
                ui.label(text);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(ctx: &egui::Context, state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CSV data")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Selected {}", path.display());
        state.start_run(path, ctx);
    }
}

pub fn export_report_dialog(state: &mut AppState) {
    let Some(run) = &state.run else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export regression report")
        .add_filter("JSON", &["json"])
        .set_file_name("regression_report.json")
        .save_file();

    if let Some(path) = file {
        match write_report(run, &path) {
            Ok(()) => {
                log::info!("Wrote report to {}", path.display());
                state.status_message = Some(format!("Report saved to {}", path.display()));
                state.status_is_error = false;
            }
            Err(e) => {
                log::error!("Failed to export report: {e:#}");
                state.set_error(format!("Error: {e:#}"));
            }
        }
    }
}

fn write_report(run: &rusty_fit::RegressionRun, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&run.report()).context("serializing report")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
