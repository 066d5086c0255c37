//! Layered dashboard configuration.
//!
//! Sources, lowest priority first:
//! 1. built-in defaults ([`DashboardConfig::default`])
//! 2. a TOML file: the explicit `--config` path (must exist), otherwise
//!    `dashboard.toml` in the working directory if present
//! 3. environment variables prefixed `DASHBOARD__`, e.g.
//!    `DASHBOARD__MIN_YEAR=1990`
//!
//! Command-line flags are applied on top by the CLI.

use crate::error::Result;
use crate::models::{ViewState, YearRange};
use crate::utils::constants::{
    CO2_OIL_FILE, CONFIG_FILE_STEM, DEFAULT_COUNTRY, DEFAULT_METRIC, ENV_PREFIX,
    OIL_PRODUCTION_FILE, WORLD,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_year_bounds"))]
#[serde(default)]
pub struct DashboardConfig {
    pub primary_path: PathBuf,

    /// Absent → single-source mode.
    pub secondary_path: Option<PathBuf>,

    pub min_year: Option<i32>,
    pub max_year: Option<i32>,

    /// `Entity,Continent` CSV replacing the built-in membership table.
    pub continents_path: Option<PathBuf>,

    #[validate(length(min = 1))]
    pub default_countries: Vec<String>,

    #[validate(length(min = 1))]
    pub default_metric: String,

    #[validate(length(min = 1))]
    pub map_metric: String,

    #[validate(length(min = 1))]
    pub default_continent: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            primary_path: PathBuf::from(OIL_PRODUCTION_FILE),
            secondary_path: Some(PathBuf::from(CO2_OIL_FILE)),
            min_year: None,
            max_year: None,
            continents_path: None,
            default_countries: vec![DEFAULT_COUNTRY.to_string()],
            default_metric: DEFAULT_METRIC.to_string(),
            map_metric: DEFAULT_METRIC.to_string(),
            default_continent: WORLD.to_string(),
        }
    }
}

fn validate_year_bounds(config: &DashboardConfig) -> std::result::Result<(), ValidationError> {
    if config.year_range().is_ordered() {
        Ok(())
    } else {
        Err(ValidationError::new("min_year_after_max_year"))
    }
}

impl DashboardConfig {
    pub fn year_range(&self) -> YearRange {
        YearRange::new(self.min_year, self.max_year)
    }

    /// The view state a fresh dashboard opens with.
    pub fn initial_view(&self) -> ViewState {
        ViewState::default()
            .with_countries(self.default_countries.iter().cloned())
            .with_metric(self.default_metric.as_str())
            .with_continent(self.default_continent.as_str())
            .with_map_metric(self.map_metric.as_str())
    }
}

/// Load defaults, then the config file, then `DASHBOARD__*` variables.
pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    build_config(path, environment())
}

/// `DASHBOARD__MIN_YEAR=1990`, `DASHBOARD__DEFAULT_COUNTRIES=Norway,Canada`.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("default_countries")
}

fn build_config(path: Option<&Path>, env: Environment) -> Result<DashboardConfig> {
    let mut builder = Config::builder().add_source(Config::try_from(&DashboardConfig::default())?);

    builder = match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            builder.add_source(File::from(path).required(true))
        }
        None => builder.add_source(File::with_name(CONFIG_FILE_STEM).required(false)),
    };

    let config: DashboardConfig = builder.add_source(env).build()?.try_deserialize()?;

    config.validate()?;
    Ok(config)
}
