use std::collections::BTreeSet;

use super::model::{UnifiedRow, UnifiedTable};

// ---------------------------------------------------------------------------
// Selection: the year and countries picked in the UI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub year: i32,
    pub countries: BTreeSet<String>,
}

impl Selection {
    /// Starting selection: the earliest year and whichever of `defaults` are
    /// present in the table. Defaults that are absent are dropped.
    pub fn initial(table: &UnifiedTable, defaults: &[String]) -> Self {
        let year = table.year_range.map(|(lo, _)| lo).unwrap_or_default();
        let countries = defaults
            .iter()
            .filter(|c| {
                let present = table.countries.contains(*c);
                if !present {
                    log::warn!("Default country '{c}' not present in data");
                }
                present
            })
            .cloned()
            .collect();
        Selection { year, countries }
    }

    /// Set the year, clamped to the table's range.
    pub fn set_year(&mut self, year: i32, table: &UnifiedTable) {
        self.year = match table.year_range {
            Some((lo, hi)) => year.clamp(lo, hi),
            None => year,
        };
    }

    pub fn toggle_country(&mut self, country: &str) {
        if !self.countries.remove(country) {
            self.countries.insert(country.to_string());
        }
    }

    pub fn select_all(&mut self, table: &UnifiedTable) {
        self.countries = table.countries.clone();
    }

    pub fn select_none(&mut self) {
        self.countries.clear();
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Rows of the unified table matching a selection. Borrowed, never mutates
/// the table.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    pub rows: Vec<&'a UnifiedRow>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Return indices of rows with exactly `year` and a country in `countries`.
/// An empty country set matches nothing.
pub fn filtered_indices(rows: &[UnifiedRow], year: i32, countries: &BTreeSet<String>) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, r)| r.year == year && countries.contains(&r.country))
        .map(|(i, _)| i)
        .collect()
}

pub fn filter<'a>(rows: &'a [UnifiedRow], year: i32, countries: &BTreeSet<String>) -> FilteredView<'a> {
    FilteredView {
        rows: filtered_indices(rows, year, countries)
            .into_iter()
            .map(|i| &rows[i])
            .collect(),
    }
}
