use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::stats::Summary;
use crate::state::AppState;

fn format_stat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.6}")
    }
}

/// Render the row count line and the describe table for the current view.
pub fn summary_table(ui: &mut Ui, state: &AppState) {
    ui.label(state.count_message());

    TableBuilder::new(ui)
        .id_salt("describe")
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(60.0))
        .columns(Column::remainder(), state.summary.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.label("");
            });
            for (metric, _) in &state.summary {
                header.col(|ui| {
                    ui.strong(metric.value_name());
                });
            }
        })
        .body(|mut body| {
            for (i, label) in Summary::ROW_LABELS.iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.strong(*label);
                    });
                    for (_, summary) in &state.summary {
                        row.col(|ui| {
                            ui.label(format_stat(summary.values()[i]));
                        });
                    }
                });
            }
        });
}

/// Informational notice shown instead of the plot.
pub fn no_data_notice(ui: &mut Ui) {
    ui.label(
        RichText::new("No data available for this selection.")
            .color(Color32::from_rgb(230, 160, 30)),
    );
}
