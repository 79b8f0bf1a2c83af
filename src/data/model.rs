use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Metric – which indicator a source table carries
// ---------------------------------------------------------------------------

/// The three indicators joined into the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Population,
    LifeExpectancy,
    GniPerCapita,
}

impl Metric {
    /// Column order of the summary table.
    pub const DESCRIBE_ORDER: [Metric; 3] = [
        Metric::Population,
        Metric::GniPerCapita,
        Metric::LifeExpectancy,
    ];

    /// Column name of the value in the long table.
    pub fn value_name(self) -> &'static str {
        match self {
            Metric::Population => "population",
            Metric::LifeExpectancy => "life_expectancy",
            Metric::GniPerCapita => "gni_per_capita",
        }
    }

    /// Axis / legend label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Population => "Population",
            Metric::LifeExpectancy => "Life Expectancy (years)",
            Metric::GniPerCapita => "GNI per Capita (PPP, USD)",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value_name())
    }
}

// ---------------------------------------------------------------------------
// WideTable – one row per country, one column per year
// ---------------------------------------------------------------------------

/// A source table exactly as read from disk. Cells stay raw text; numeric
/// coercion happens when the table is reshaped.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable {
    /// Header row, id column included.
    pub headers: Vec<String>,
    /// Data rows, each the same length as `headers`.
    pub rows: Vec<Vec<String>>,
}

impl WideTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        WideTable { headers, rows }
    }

    /// Position of the named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.headers.len()
    }
}

// ---------------------------------------------------------------------------
// LongRow / LongTable – tidy (country, year, value) triples
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub country: String,
    pub year: i32,
    pub value: f64,
}

/// Result of melting a [`WideTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct LongTable {
    pub value_name: String,
    pub rows: Vec<LongRow>,
    /// How many cells fell back to zero during coercion.
    pub coerced_cells: usize,
}

impl LongTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// UnifiedRow – the joined record plotted by the dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedRow {
    pub country: String,
    pub year: i32,
    pub population: f64,
    pub life_expectancy: f64,
    pub gni_per_capita: f64,
}

impl UnifiedRow {
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Population => self.population,
            Metric::LifeExpectancy => self.life_expectancy,
            Metric::GniPerCapita => self.gni_per_capita,
        }
    }

    /// Bubble size: population in millions, offset by one so that a zero
    /// population still yields a visible marker.
    pub fn marker_size(&self) -> f64 {
        self.population / 1_000_000.0 + 1.0
    }
}

// ---------------------------------------------------------------------------
// UnifiedTable – joined rows plus the indices the UI needs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct UnifiedTable {
    pub rows: Vec<UnifiedRow>,
    /// Sorted unique country names.
    pub countries: BTreeSet<String>,
    /// Inclusive `(min, max)` year, `None` when there are no rows.
    pub year_range: Option<(i32, i32)>,
}

impl UnifiedTable {
    /// Build indices from the joined rows.
    pub fn from_rows(rows: Vec<UnifiedRow>) -> Self {
        let countries = rows.iter().map(|r| r.country.clone()).collect();
        let year_range = rows.iter().fold(None, |acc, r| match acc {
            None => Some((r.year, r.year)),
            Some((lo, hi)) => Some((lo.min(r.year), hi.max(r.year))),
        });
        UnifiedTable {
            rows,
            countries,
            year_range,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, year: i32, population: f64) -> UnifiedRow {
        UnifiedRow {
            country: country.to_string(),
            year,
            population,
            life_expectancy: 70.0,
            gni_per_capita: 1000.0,
        }
    }

    #[test]
    fn marker_size_has_floor_of_one() {
        assert_eq!(row("A", 2000, 0.0).marker_size(), 1.0);
        assert_eq!(row("USA", 2020, 331_000_000.0).marker_size(), 332.0);
    }

    #[test]
    fn unified_table_indexes_years_and_countries() {
        let table = UnifiedTable::from_rows(vec![
            row("Germany", 2001, 1.0),
            row("Chad", 1999, 1.0),
            row("Germany", 2005, 1.0),
        ]);
        assert_eq!(table.year_range, Some((1999, 2005)));
        let countries: Vec<_> = table.countries.iter().map(String::as_str).collect();
        assert_eq!(countries, ["Chad", "Germany"]);
    }

    #[test]
    fn empty_unified_table_has_no_year_range() {
        let table = UnifiedTable::from_rows(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.year_range, None);
    }
}
