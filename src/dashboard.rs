use crate::config::DashboardConfig;
use crate::error::Result;
use crate::models::{
    ChoroplethMap, ContinentCatalog, DashboardTab, Dataset, Figure, LineChart, ViewState,
};
use crate::processors::{load_catalog, DatasetLoader, IntegrityReport};
use crate::utils::progress::ProgressReporter;
use crate::views::{build_choropleth, build_line_chart};
use serde::Serialize;

/// What the dashboard widgets can offer, plus the state they start in.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardOptions {
    pub countries: Vec<String>,
    pub metrics: Vec<String>,
    pub continents: Vec<String>,
    pub year_range: Option<(i32, i32)>,
    pub initial_view: ViewState,
}

/// The loaded dataset and catalog, shared read-only by every view.
pub struct Dashboard {
    dataset: Dataset,
    catalog: ContinentCatalog,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(dataset: Dataset, catalog: ContinentCatalog, config: DashboardConfig) -> Self {
        Self {
            dataset,
            catalog,
            config,
        }
    }

    /// Load sources and catalog named by `config`. Fails fast on any bad file.
    pub fn load(
        config: DashboardConfig,
        progress: Option<&ProgressReporter>,
    ) -> Result<(Self, IntegrityReport)> {
        let catalog = load_catalog(config.continents_path.as_deref())?;
        let (dataset, report) = DatasetLoader::from_config(&config).load(progress)?;
        Ok((Self::new(dataset, catalog, config), report))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn catalog(&self) -> &ContinentCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Line chart; an empty selection falls back to the configured countries.
    pub fn line_chart<S: AsRef<str>>(&self, countries: &[S], metric: &str) -> LineChart {
        if countries.is_empty() {
            build_line_chart(&self.dataset, &self.config.default_countries, metric)
        } else {
            build_line_chart(&self.dataset, countries, metric)
        }
    }

    pub fn choropleth(&self, continent: &str) -> Result<ChoroplethMap> {
        build_choropleth(&self.dataset, &self.catalog, continent, &self.config.map_metric)
    }

    /// Render whichever tab `state` has active. Unset selections fall back
    /// to the configured defaults.
    pub fn render(&self, state: &ViewState) -> Result<Figure> {
        match state.tab {
            DashboardTab::LineChart => {
                let metric = state.metric.as_deref().unwrap_or(&self.config.default_metric);
                Ok(Figure::Line(self.line_chart(&state.countries, metric)))
            }
            DashboardTab::ChoroplethMap => {
                let continent = state
                    .continent
                    .as_deref()
                    .unwrap_or(&self.config.default_continent);
                let metric = state.map_metric.as_deref().unwrap_or(&self.config.map_metric);
                Ok(Figure::Choropleth(build_choropleth(
                    &self.dataset,
                    &self.catalog,
                    continent,
                    metric,
                )?))
            }
        }
    }

    pub fn options(&self) -> DashboardOptions {
        DashboardOptions {
            countries: self.dataset.entities().into_iter().map(String::from).collect(),
            metrics: self.dataset.metrics().to_vec(),
            continents: self.catalog.continents().into_iter().map(String::from).collect(),
            year_range: self.dataset.year_range(),
            initial_view: self.config.initial_view(),
        }
    }
}
