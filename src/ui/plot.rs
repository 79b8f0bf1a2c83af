use eframe::egui::Ui;
use egui_plot::{GridMark, Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points};

use crate::data::filter::FilteredView;
use crate::data::model::{Metric, UnifiedRow};
use crate::state::AppState;

/// Radius of the largest bubble in the view, in points.
const MAX_MARKER_RADIUS: f32 = 50.0;
const MIN_MARKER_RADIUS: f32 = 2.0;

// ---------------------------------------------------------------------------
// Bubble scatter (central panel)
// ---------------------------------------------------------------------------

/// Marker radius for `row`, scaled by area against the largest bubble.
pub fn marker_radius(row: &UnifiedRow, max_size: f64) -> f32 {
    if max_size <= 0.0 {
        return MIN_MARKER_RADIUS;
    }
    let r = MAX_MARKER_RADIUS * (row.marker_size() / max_size).sqrt() as f32;
    r.max(MIN_MARKER_RADIUS)
}

/// x position on the log axis; `None` for values a log scale cannot show.
pub fn log_x(row: &UnifiedRow) -> Option<f64> {
    (row.gni_per_capita > 0.0).then(|| row.gni_per_capita.log10())
}

fn format_log_tick(mark: GridMark) -> String {
    let value = 10f64.powf(mark.value);
    if value >= 1000.0 {
        format!("{:.0}k", value / 1000.0)
    } else {
        format!("{value:.0}")
    }
}

fn format_hover(name: &str, point: &PlotPoint) -> String {
    let gni = 10f64.powf(point.x);
    if name.is_empty() {
        format!("GNI: {gni:.0}\nLife expectancy: {:.1}", point.y)
    } else {
        format!("{name}\nGNI: {gni:.0}\nLife expectancy: {:.1}", point.y)
    }
}

/// Render the scatter of GNI per capita (log x) against life expectancy.
pub fn scatter_plot(ui: &mut Ui, state: &AppState, view: &FilteredView<'_>) {
    ui.heading(format!(
        "World Development Indicators in {}",
        state.selection.year
    ));

    let max_size = view
        .rows
        .iter()
        .map(|r| r.marker_size())
        .fold(0.0, f64::max);

    Plot::new("indicator_scatter")
        .legend(Legend::default())
        .x_axis_label(Metric::GniPerCapita.label())
        .y_axis_label(Metric::LifeExpectancy.label())
        .x_axis_formatter(|mark, _range| format_log_tick(mark))
        .label_formatter(format_hover)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for row in &view.rows {
                let Some(x) = log_x(row) else {
                    continue;
                };
                let points = Points::new(PlotPoints::new(vec![[x, row.life_expectancy]]))
                    .name(&row.country)
                    .color(state.color_map.color_for(&row.country))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(marker_radius(row, max_size));
                plot_ui.points(points);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(population: f64, gni: f64) -> UnifiedRow {
        UnifiedRow {
            country: "A".into(),
            year: 2000,
            population,
            life_expectancy: 70.0,
            gni_per_capita: gni,
        }
    }

    #[test]
    fn largest_bubble_gets_max_radius() {
        let big = row(99_000_000.0, 1.0);
        assert_eq!(marker_radius(&big, big.marker_size()), MAX_MARKER_RADIUS);
    }

    #[test]
    fn tiny_population_still_visible() {
        let r = marker_radius(&row(0.0, 1.0), 1_000_000.0);
        assert_eq!(r, MIN_MARKER_RADIUS);
    }

    #[test]
    fn non_positive_gni_is_not_plotted() {
        assert_eq!(log_x(&row(1.0, 0.0)), None);
        assert_eq!(log_x(&row(1.0, 1000.0)), Some(3.0));
    }
}
