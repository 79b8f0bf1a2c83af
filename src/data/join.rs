use std::collections::HashMap;

use super::model::{LongRow, LongTable, UnifiedRow};

/// Index the values of a long table by `(country, year)`. Duplicate keys keep
/// every value so the join behaves like a relational inner join.
fn index_by_key(rows: &[LongRow]) -> HashMap<(&str, i32), Vec<f64>> {
    let mut index: HashMap<(&str, i32), Vec<f64>> = HashMap::with_capacity(rows.len());
    for r in rows {
        index
            .entry((r.country.as_str(), r.year))
            .or_default()
            .push(r.value);
    }
    index
}

/// Join the three long tables on `(country, year)`.
///
/// Population is joined with life expectancy, then the result with GNI per
/// capita; both joins are inner, so a key missing from any input is dropped.
/// Output follows population's row order. Values are copied unchanged.
pub fn unify(population: &LongTable, lex: &LongTable, gni: &LongTable) -> Vec<UnifiedRow> {
    let lex_index = index_by_key(&lex.rows);
    let gni_index = index_by_key(&gni.rows);

    let mut unified = Vec::new();
    for p in &population.rows {
        let key = (p.country.as_str(), p.year);
        let (Some(lex_values), Some(gni_values)) = (lex_index.get(&key), gni_index.get(&key))
        else {
            continue;
        };
        for &life_expectancy in lex_values {
            for &gni_per_capita in gni_values {
                unified.push(UnifiedRow {
                    country: p.country.clone(),
                    year: p.year,
                    population: p.value,
                    life_expectancy,
                    gni_per_capita,
                });
            }
        }
    }

    log::info!(
        "Joined {} population, {} life expectancy, {} GNI rows into {} unified rows",
        population.len(),
        lex.len(),
        gni.len(),
        unified.len()
    );
    unified
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long(value_name: &str, rows: &[(&str, i32, f64)]) -> LongTable {
        LongTable {
            value_name: value_name.to_string(),
            rows: rows
                .iter()
                .map(|&(c, y, v)| LongRow {
                    country: c.to_string(),
                    year: y,
                    value: v,
                })
                .collect(),
            coerced_cells: 0,
        }
    }

    #[test]
    fn keeps_only_keys_present_in_all_three() {
        let pop = long("population", &[("A", 2000, 1.0), ("B", 2000, 2.0), ("C", 2000, 3.0)]);
        let lex = long("life_expectancy", &[("A", 2000, 60.0), ("B", 2000, 61.0)]);
        let gni = long("gni_per_capita", &[("A", 2000, 500.0), ("C", 2000, 700.0)]);

        let rows = unify(&pop, &lex, &gni);
        assert_eq!(
            rows,
            [UnifiedRow {
                country: "A".into(),
                year: 2000,
                population: 1.0,
                life_expectancy: 60.0,
                gni_per_capita: 500.0,
            }]
        );
    }

    #[test]
    fn year_is_part_of_the_key() {
        let pop = long("population", &[("A", 2000, 1.0), ("A", 2001, 2.0)]);
        let lex = long("life_expectancy", &[("A", 2001, 60.0)]);
        let gni = long("gni_per_capita", &[("A", 2000, 5.0), ("A", 2001, 6.0)]);

        let rows = unify(&pop, &lex, &gni);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, 2001);
        assert_eq!(rows[0].population, 2.0);
        assert_eq!(rows[0].gni_per_capita, 6.0);
    }

    #[test]
    fn zero_values_still_join() {
        let pop = long("population", &[("A", 2000, 0.0)]);
        let lex = long("life_expectancy", &[("A", 2000, 0.0)]);
        let gni = long("gni_per_capita", &[("A", 2000, 0.0)]);
        assert_eq!(unify(&pop, &lex, &gni).len(), 1);
    }

    #[test]
    fn duplicate_keys_multiply_like_an_inner_join() {
        let pop = long("population", &[("A", 2000, 1.0)]);
        let lex = long("life_expectancy", &[("A", 2000, 60.0), ("A", 2000, 61.0)]);
        let gni = long("gni_per_capita", &[("A", 2000, 5.0), ("A", 2000, 6.0)]);
        assert_eq!(unify(&pop, &lex, &gni).len(), 4);
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let pop = long("population", &[("A", 2000, 1.0)]);
        let empty = long("life_expectancy", &[]);
        assert!(unify(&pop, &empty, &pop).is_empty());
    }
}
