//! Wide → long reshaping and lenient numeric coercion.

use super::error::TableError;
use super::model::{LongRow, LongTable, WideTable};

/// Multiplier carried by a trailing `k` marker.
const THOUSANDS: f64 = 1000.0;

/// A single coerced cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub value: f64,
    /// The cell carried a `k` marker, already applied to `value`.
    pub thousands: bool,
    /// A non-empty cell that fell back to zero.
    pub coerced: bool,
}

impl Cell {
    const ZERO: Cell = Cell {
        value: 0.0,
        thousands: false,
        coerced: false,
    };

    const COERCED: Cell = Cell {
        value: 0.0,
        thousands: false,
        coerced: true,
    };
}

/// Parse a cell the permissive way: thousands separators and surrounding
/// whitespace are dropped and a trailing `k` multiplies by 1000. Anything
/// left that is empty, unparsable or non-finite becomes `0.0`.
pub fn parse_cell(raw: &str) -> Cell {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();
    let (number, thousands) = match cleaned.strip_suffix('k') {
        Some(rest) => (rest.trim(), true),
        None => (cleaned, false),
    };

    if number.is_empty() {
        return if thousands { Cell::COERCED } else { Cell::ZERO };
    }
    let Ok(parsed) = number.parse::<f64>() else {
        return Cell::COERCED;
    };
    let value = if thousands { parsed * THOUSANDS } else { parsed };
    if !value.is_finite() {
        return Cell::COERCED;
    }
    Cell {
        value,
        thousands,
        coerced: false,
    }
}

/// Numeric value of a raw cell, zero when it cannot be read.
pub fn parse_lenient(raw: &str) -> f64 {
    parse_cell(raw).value
}

/// Parse a year column label. Unlike cells, a bad label is fatal.
pub fn parse_year(label: &str) -> Result<i32, TableError> {
    label
        .trim()
        .parse::<i32>()
        .map_err(|_| TableError::InvalidYearLabel(label.to_string()))
}

/// Melt `table` into `(country, year, value)` rows.
///
/// Every non-id column must be a year label. Each `(row, year column)` cell
/// yields exactly one [`LongRow`]. Cells without a `k` marker are multiplied
/// by `scale`; marked cells are already in units and are left alone. The
/// output always has `rows × year columns` entries.
pub fn load_and_reshape(
    table: &WideTable,
    id_column: &str,
    value_name: &str,
    scale: f64,
) -> Result<LongTable, TableError> {
    let id_idx = table
        .column_index(id_column)
        .ok_or_else(|| TableError::MissingIdColumn(id_column.to_string()))?;

    let year_columns = table
        .headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != id_idx)
        .map(|(i, label)| parse_year(label).map(|year| (i, year)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::with_capacity(table.n_rows() * year_columns.len());
    let mut coerced_cells = 0;

    for (row_no, cells) in table.rows.iter().enumerate() {
        if cells.len() != table.headers.len() {
            return Err(TableError::RaggedRow {
                row: row_no,
                expected: table.headers.len(),
                found: cells.len(),
            });
        }
        let country = &cells[id_idx];
        for &(col, year) in &year_columns {
            let cell = parse_cell(&cells[col]);
            // A `k` marker already states the unit; the table scale covers the rest.
            let mut value = if cell.thousands {
                cell.value
            } else {
                cell.value * scale
            };
            if cell.coerced || !value.is_finite() {
                coerced_cells += 1;
                value = 0.0;
            }
            rows.push(LongRow {
                country: country.clone(),
                year,
                value,
            });
        }
    }

    if coerced_cells > 0 {
        log::warn!("{value_name}: {coerced_cells} unparsable cells coerced to 0");
    }

    Ok(LongTable {
        value_name: value_name.to_string(),
        rows,
        coerced_cells,
    })
}
