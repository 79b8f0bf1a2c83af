use anyhow::{Context, Result};

use super::join::unify;
use super::loader::load_wide_table;
use super::model::{LongTable, Metric, UnifiedTable};
use super::reshape::load_and_reshape;
use crate::config::DashboardConfig;

/// Load and melt the source table for one metric.
fn load_long(config: &DashboardConfig, metric: Metric) -> Result<LongTable> {
    let path = config.path_for(metric);
    let wide = load_wide_table(&path)?;
    let long = load_and_reshape(
        &wide,
        &config.id_column,
        metric.value_name(),
        config.unit_scale(metric),
    )
    .with_context(|| format!("reshaping {}", path.display()))?;
    if long.is_empty() {
        log::warn!("{metric}: {} has no data cells", path.display());
    } else {
        log::info!("{metric}: {} long rows", long.len());
    }
    Ok(long)
}

/// Run load → reshape → unify for all three sources. Any missing or
/// malformed table fails the whole build.
pub fn build_unified(config: &DashboardConfig) -> Result<UnifiedTable> {
    let population = load_long(config, Metric::Population)?;
    let lex = load_long(config, Metric::LifeExpectancy)?;
    let gni = load_long(config, Metric::GniPerCapita)?;

    let table = UnifiedTable::from_rows(unify(&population, &lex, &gni));
    match table.year_range {
        Some((lo, hi)) => log::info!(
            "Unified table: {} rows, {} countries, years {lo}..={hi}",
            table.len(),
            table.countries.len()
        ),
        None => log::warn!("Unified table is empty; no (country, year) is present in all sources"),
    }
    Ok(table)
}
