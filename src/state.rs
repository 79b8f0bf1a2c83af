use std::path::PathBuf;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{filter, filtered_indices, FilteredView, Selection};
use crate::data::model::{Metric, UnifiedTable};
use crate::data::pipeline::build_unified;
use crate::data::stats::{describe, Summary};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Joined table (None until the sources load successfully).
    pub table: Option<UnifiedTable>,

    /// Current year and country selection.
    pub selection: Selection,

    /// Indices of rows passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Summary statistics over the visible rows.
    pub summary: Vec<(Metric, Summary)>,

    /// One colour per country in the table.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            table: None,
            selection: Selection::default(),
            visible_indices: Vec::new(),
            summary: Vec::new(),
            color_map: ColorMap::default(),
            status_message: None,
        }
    }

    /// Run the pipeline for the current config. A failure leaves the state
    /// without a table and reports the error in the status line.
    pub fn reload(&mut self) {
        match build_unified(&self.config) {
            Ok(table) => self.set_table(table),
            Err(e) => {
                log::error!("Failed to load data: {e:#}");
                self.table = None;
                self.visible_indices.clear();
                self.summary.clear();
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Point the config at another data directory and reload.
    pub fn open_data_dir(&mut self, dir: PathBuf) {
        self.config.data_dir = dir;
        self.reload();
    }

    /// Ingest a newly built table, initialise selection and colours.
    pub fn set_table(&mut self, table: UnifiedTable) {
        self.selection = Selection::initial(&table, &self.config.default_countries);
        self.color_map = ColorMap::new(&table.countries);
        self.table = Some(table);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and the summary after a selection change.
    pub fn refilter(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        self.visible_indices =
            filtered_indices(&table.rows, self.selection.year, &self.selection.countries);
        self.summary = describe(&filter(
            &table.rows,
            self.selection.year,
            &self.selection.countries,
        ));
        log::debug!(
            "Selection year={} countries={:?}: {} rows",
            self.selection.year,
            self.selection.countries,
            self.visible_indices.len()
        );
    }

    /// The rows currently selected.
    pub fn view(&self) -> FilteredView<'_> {
        match &self.table {
            Some(table) => FilteredView {
                rows: self.visible_indices.iter().map(|&i| &table.rows[i]).collect(),
            },
            None => FilteredView::default(),
        }
    }

    pub fn set_year(&mut self, year: i32) {
        if let Some(table) = &self.table {
            self.selection.set_year(year, table);
            self.refilter();
        }
    }

    pub fn toggle_country(&mut self, country: &str) {
        self.selection.toggle_country(country);
        self.refilter();
    }

    pub fn select_all(&mut self) {
        if let Some(table) = &self.table {
            self.selection.select_all(table);
            self.refilter();
        }
    }

    pub fn select_none(&mut self) {
        self.selection.select_none();
        self.refilter();
    }

    /// The "Data points for year .. and countries ..: n" line.
    pub fn count_message(&self) -> String {
        let countries = self
            .selection
            .countries
            .iter()
            .map(|c| format!("'{c}'"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Data points for year {} and countries [{}]: {}",
            self.selection.year,
            countries,
            self.visible_indices.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::model::UnifiedRow;

    fn row(country: &str, year: i32) -> UnifiedRow {
        UnifiedRow {
            country: country.to_string(),
            year,
            population: 2_000_000.0,
            life_expectancy: 70.0,
            gni_per_capita: 10_000.0,
        }
    }

    fn state() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_table(UnifiedTable::from_rows(vec![
            row("Germany", 2000),
            row("Germany", 2001),
            row("United States", 2001),
            row("Chad", 2000),
        ]));
        state
    }

    #[test]
    fn set_table_applies_default_selection() {
        let state = state();
        assert_eq!(state.selection.year, 2000);
        assert_eq!(state.selection.countries.len(), 2);
        assert_eq!(state.visible_indices, [0]);
        assert_eq!(state.summary[0].1.count, 1);
    }

    #[test]
    fn changing_year_refilters() {
        let mut state = state();
        state.set_year(2001);
        assert_eq!(state.visible_indices, [1, 2]);
        assert_eq!(
            state.count_message(),
            "Data points for year 2001 and countries ['Germany', 'United States']: 2"
        );
    }

    #[test]
    fn deselecting_everything_gives_empty_view() {
        let mut state = state();
        state.select_none();
        assert!(state.view().is_empty());
        assert_eq!(
            state.count_message(),
            "Data points for year 2000 and countries []: 0"
        );
        assert_eq!(state.summary[0].1.count, 0);
        state.select_all();
        assert_eq!(state.view().len(), 2);
    }

    #[test]
    fn failed_reload_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state();
        state.open_data_dir(dir.path().to_path_buf());
        assert!(state.table.is_none());
        assert!(state.view().is_empty());
        assert!(state.status_message.is_some());
    }
}
