use crate::models::{Dataset, ObservationKey};
use crate::processors::MergeStats;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub path: PathBuf,
    pub rows_read: usize,
    pub rows_outside_years: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    pub sources: Vec<SourceSummary>,
    pub joined: bool,
    pub total_rows: usize,
    pub entities: usize,
    pub year_range: Option<(i32, i32)>,
    pub exact_duplicates: usize,
    pub conflicting_duplicates: usize,
    pub conflicts: Vec<ObservationKey>,
    pub unmatched_primary: usize,
    pub unmatched_secondary: usize,
    pub rows_without_code: usize,
    pub missing_values: Vec<(String, usize)>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.conflicting_duplicates == 0
    }
}

pub struct IntegrityChecker;

impl IntegrityChecker {
    pub fn new() -> Self {
        Self
    }

    /// Summarise a loaded dataset together with what the merge dropped.
    pub fn check_integrity(
        &self,
        dataset: &Dataset,
        sources: Vec<SourceSummary>,
        stats: &MergeStats,
    ) -> IntegrityReport {
        IntegrityReport {
            sources,
            joined: stats.joined,
            total_rows: dataset.len(),
            entities: dataset.entities().len(),
            year_range: dataset.year_range(),
            exact_duplicates: stats.exact_duplicates,
            conflicting_duplicates: stats.conflicting_duplicates,
            conflicts: stats.conflicts.clone(),
            unmatched_primary: stats.unmatched_primary,
            unmatched_secondary: stats.unmatched_secondary,
            rows_without_code: dataset.rows().iter().filter(|r| !r.has_code()).count(),
            missing_values: dataset.missing_by_metric(),
        }
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Integrity Check Report ===\n");
        for source in &report.sources {
            summary.push_str(&format!(
                "Source {}: {} rows read, {} outside year range\n",
                source.path.display(),
                source.rows_read,
                source.rows_outside_years
            ));
        }
        summary.push_str(&format!(
            "Mode: {}\n",
            if report.joined { "joined" } else { "single source" }
        ));
        summary.push_str(&format!("Total Rows: {}\n", report.total_rows));
        summary.push_str(&format!("Entities: {}\n", report.entities));
        if let Some((first, last)) = report.year_range {
            summary.push_str(&format!("Years: {}-{}\n", first, last));
        }
        summary.push_str(&format!(
            "Rows Without Code: {}\n",
            report.rows_without_code
        ));
        summary.push_str(&format!(
            "Exact Duplicates Removed: {}\n",
            report.exact_duplicates
        ));
        summary.push_str(&format!(
            "Conflicting Duplicates Dropped: {}\n",
            report.conflicting_duplicates
        ));
        if report.joined {
            summary.push_str(&format!(
                "Unmatched Rows: {} primary, {} secondary\n",
                report.unmatched_primary, report.unmatched_secondary
            ));
        }

        summary.push_str("\nMissing Values:\n");
        for (metric, missing) in &report.missing_values {
            let pct = if report.total_rows == 0 {
                0.0
            } else {
                100.0 * *missing as f64 / report.total_rows as f64
            };
            summary.push_str(&format!("  {}: {} ({:.1}%)\n", metric, missing, pct));
        }

        if !report.conflicts.is_empty() {
            summary.push_str("\nConflicting Keys:\n");
            for (i, key) in report.conflicts.iter().enumerate() {
                summary.push_str(&format!(
                    "  {}. {} ({}) {}\n",
                    i + 1,
                    key.entity,
                    key.code,
                    key.year
                ));
            }
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}
