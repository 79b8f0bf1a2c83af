use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::model::Metric;

pub const CONFIG_ENV: &str = "LONGEVITY_DASH_CONFIG";
pub const DATA_DIR_ENV: &str = "LONGEVITY_DASH_DATA_DIR";
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Where the source tables live and how they are interpreted.
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub population_file: String,
    pub life_expectancy_file: String,
    pub gni_file: String,
    pub id_column: String,
    pub default_countries: Vec<String>,
    /// Multiplier bringing the GNI table to the same unit as the others.
    pub gni_unit_scale: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            population_file: "pop.csv".into(),
            life_expectancy_file: "lex.csv".into(),
            gni_file: "ny_gnp_pcap_pp_cd.csv".into(),
            id_column: "country".into(),
            default_countries: vec!["United States".into(), "Germany".into()],
            gni_unit_scale: 1000.0,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing dashboard config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Resolve the configuration from the environment: an explicit config
    /// path, then `dashboard.json` in the working directory, then defaults.
    /// A data directory given in the environment wins over the file.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        log::info!("Using data directory {}", config.data_dir.display());
        Ok(config)
    }

    /// Full path of the source table for `metric`.
    pub fn path_for(&self, metric: Metric) -> PathBuf {
        let file = match metric {
            Metric::Population => &self.population_file,
            Metric::LifeExpectancy => &self.life_expectancy_file,
            Metric::GniPerCapita => &self.gni_file,
        };
        self.data_dir.join(file)
    }

    /// Unit multiplier applied to every value of `metric` after parsing.
    pub fn unit_scale(&self, metric: Metric) -> f64 {
        match metric {
            Metric::GniPerCapita => self.gni_unit_scale,
            Metric::Population | Metric::LifeExpectancy => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(DashboardConfig::from_json("{}").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn partial_config_overrides_named_fields() {
        let config = DashboardConfig::from_json(
            r#"{ "data_dir": "/data", "default_countries": ["Chad"], "gni_unit_scale": 1.0 }"#,
        )
        .unwrap();
        assert_eq!(config.default_countries, ["Chad"]);
        assert_eq!(config.unit_scale(Metric::GniPerCapita), 1.0);
        assert_eq!(
            config.path_for(Metric::LifeExpectancy),
            Path::new("/data").join("lex.csv")
        );
    }

    #[test]
    fn only_gni_is_rescaled_by_default() {
        let config = DashboardConfig::default();
        assert_eq!(config.unit_scale(Metric::GniPerCapita), 1000.0);
        assert_eq!(config.unit_scale(Metric::Population), 1.0);
        assert_eq!(config.unit_scale(Metric::LifeExpectancy), 1.0);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(DashboardConfig::from_json("{ \"data_dir\": 3 }").is_err());
        assert!(DashboardConfig::from_json("{ \"datadir\": \".\" }").is_err());
    }

    #[test]
    fn reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(&path, r#"{ "gni_file": "gni.parquet" }"#).unwrap();
        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.gni_file, "gni.parquet");
    }
}
