use crate::config::DashboardConfig;
use crate::error::Result;
use crate::models::{ContinentCatalog, Dataset, YearRange};
use crate::processors::{DataMerger, IntegrityChecker, IntegrityReport, SourceSummary};
use crate::readers::{ContinentReader, ObservationReader, ObservationTable};
use crate::utils::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Loads the source files once at startup and produces the cleaned table.
pub struct DatasetLoader {
    primary: PathBuf,
    secondary: Option<PathBuf>,
    year_range: YearRange,
}

impl DatasetLoader {
    pub fn new(primary: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
            year_range: YearRange::unbounded(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            primary: config.primary_path.clone(),
            secondary: config.secondary_path.clone(),
            year_range: config.year_range(),
        }
    }

    pub fn with_secondary(mut self, secondary: impl Into<PathBuf>) -> Self {
        self.secondary = Some(secondary.into());
        self
    }

    pub fn with_year_range(mut self, year_range: YearRange) -> Self {
        self.year_range = year_range;
        self
    }

    /// Read, join or filter, de-duplicate, and check the sources.
    pub fn load(&self, progress: Option<&ProgressReporter>) -> Result<(Dataset, IntegrityReport)> {
        if let Some(p) = progress {
            p.set_message("Reading source files...");
        }

        let reader = ObservationReader::with_year_range(self.year_range);
        let merger = DataMerger::new();

        let (dataset, sources, stats) = match &self.secondary {
            Some(secondary) => {
                info!(
                    primary = %self.primary.display(),
                    secondary = %secondary.display(),
                    years = %self.year_range,
                    "loading joined sources"
                );
                let (primary, secondary) = rayon::join(
                    || reader.read_table(&self.primary),
                    || reader.read_table(secondary),
                );
                let (primary, secondary) = (primary?, secondary?);
                let sources = vec![summarize(&primary), summarize(&secondary)];

                if let Some(p) = progress {
                    p.set_message("Joining sources...");
                }
                let (dataset, stats) = merger.merge(primary, secondary)?;
                (dataset, sources, stats)
            }
            None => {
                info!(
                    primary = %self.primary.display(),
                    years = %self.year_range,
                    "loading single source"
                );
                let table = reader.read_table(&self.primary)?;
                let sources = vec![summarize(&table)];
                let (dataset, stats) = merger.merge_single(table);
                (dataset, sources, stats)
            }
        };

        if let Some(p) = progress {
            p.set_message("Checking data integrity...");
        }
        let report = IntegrityChecker::new().check_integrity(&dataset, sources, &stats);

        info!(
            rows = dataset.len(),
            metrics = dataset.metrics().len(),
            entities = report.entities,
            "dataset ready"
        );

        if let Some(p) = progress {
            p.finish_and_clear();
        }

        Ok((dataset, report))
    }
}

fn summarize(table: &ObservationTable) -> SourceSummary {
    SourceSummary {
        path: table.path.clone(),
        rows_read: table.rows_read,
        rows_outside_years: table.rows_outside_years,
    }
}

/// Built-in catalog, or the built-in framings with membership from `path`.
pub fn load_catalog(path: Option<&Path>) -> Result<ContinentCatalog> {
    match path {
        Some(path) => {
            let membership = ContinentReader::new().read_membership(path)?;
            info!(
                path = %path.display(),
                countries = membership.len(),
                "loaded continent mapping"
            );
            ContinentCatalog::builtin().with_membership(membership)
        }
        None => Ok(ContinentCatalog::builtin()),
    }
}
