use eframe::egui::Ui;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Points};
use rusty_fit::RegressionRun;

use crate::color::SeriesColors;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Regression plot (central panel)
// ---------------------------------------------------------------------------

/// Scatter of the observed points with the fitted line drawn over them.
pub fn regression_plot(ui: &mut Ui, state: &AppState) {
    let run = match &state.run {
        Some(run) => run,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                if state.loading {
                    ui.spinner();
                } else {
                    ui.heading("Load a CSV to fit a line  (File → Open CSV…)");
                }
            });
            return;
        }
    };

    let series = &run.series;
    let colors = SeriesColors::default();

    Plot::new("regression_plot")
        .legend(Legend::default())
        .x_axis_label(series.x_label.clone())
        .y_axis_label(series.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let observed = Points::new(PlotPoints::from(series.observed.clone()))
                .name("Observed")
                .color(colors.observed)
                .radius(4.0);
            plot_ui.points(observed);

            let predicted = Line::new(PlotPoints::from(series.predicted.clone()))
                .name("Regression (predicted)")
                .color(colors.predicted)
                .style(LineStyle::Dashed { length: 6.0 })
                .width(2.0);
            plot_ui.line(predicted);
        });
}

// ---------------------------------------------------------------------------
// Loss history (side panel)
// ---------------------------------------------------------------------------

/// Training loss per epoch on normalized data.
pub fn loss_plot(ui: &mut Ui, run: &RegressionRun) {
    let points: PlotPoints = run
        .line
        .history
        .iter()
        .map(|h| [h.epoch as f64, h.loss])
        .collect();

    Plot::new("loss_plot")
        .height(160.0)
        .x_axis_label("epoch")
        .y_axis_label("loss")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("loss")
                    .color(SeriesColors::default().loss)
                    .width(1.5),
            );
        });
}
