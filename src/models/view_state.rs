use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardTab {
    #[default]
    LineChart,
    ChoroplethMap,
}

/// Everything the dashboard widgets hold: the active tab and each selection.
///
/// Owned by whatever renders the dashboard; the engine only reads it.
/// An unset selection (empty `countries`, `None` elsewhere) resolves to the
/// configured default when rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub tab: DashboardTab,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_metric: Option<String>,
}

impl ViewState {
    pub fn with_tab(mut self, tab: DashboardTab) -> Self {
        self.tab = tab;
        self
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = Some(metric.into());
        self
    }

    pub fn with_continent(mut self, continent: impl Into<String>) -> Self {
        self.continent = Some(continent.into());
        self
    }

    pub fn with_map_metric(mut self, metric: impl Into<String>) -> Self {
        self.map_metric = Some(metric.into());
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| {
            crate::error::DashboardError::FileOpen {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_json(&json)
    }
}
