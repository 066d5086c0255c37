use crate::error::{DashboardError, Result};
use crate::models::{Dataset, ObservationKey, ObservationRow};
use crate::readers::ObservationTable;
use crate::utils::constants::MAX_REPORTED_CONFLICTS;
use std::collections::HashMap;
use tracing::{info, warn};

/// Counters collected while de-duplicating and joining.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeStats {
    pub joined: bool,
    pub exact_duplicates: usize,
    pub conflicting_duplicates: usize,
    /// First few keys that had conflicting rows.
    pub conflicts: Vec<ObservationKey>,
    pub unmatched_primary: usize,
    pub unmatched_secondary: usize,
}

impl MergeStats {
    fn record_conflict(&mut self, key: ObservationKey) {
        self.conflicting_duplicates += 1;
        if self.conflicts.len() < MAX_REPORTED_CONFLICTS {
            self.conflicts.push(key);
        }
    }
}

pub struct DataMerger;

impl DataMerger {
    pub fn new() -> Self {
        Self
    }

    /// Clean a single source into a dataset.
    pub fn merge_single(&self, table: ObservationTable) -> (Dataset, MergeStats) {
        let mut stats = MergeStats::default();
        let rows = self.deduplicate(table.rows, &mut stats);
        (Dataset::new(table.metrics, rows), stats)
    }

    /// Inner-join two sources on (Entity, Code, Year).
    ///
    /// Each side is de-duplicated first so the join is one-to-one. Primary
    /// metrics come first in the merged rows.
    pub fn merge(
        &self,
        primary: ObservationTable,
        secondary: ObservationTable,
    ) -> Result<(Dataset, MergeStats)> {
        if let Some(column) = secondary
            .metrics
            .iter()
            .find(|m| primary.metrics.contains(m))
        {
            return Err(DashboardError::DuplicateColumn {
                path: secondary.path.clone(),
                column: column.clone(),
            });
        }

        let mut stats = MergeStats {
            joined: true,
            ..MergeStats::default()
        };

        let primary_rows = self.deduplicate(primary.rows, &mut stats);
        let secondary_rows = self.deduplicate(secondary.rows, &mut stats);

        let mut secondary_by_key: HashMap<ObservationKey, ObservationRow> = secondary_rows
            .into_iter()
            .map(|row| (row.key(), row))
            .collect();

        let mut merged = Vec::with_capacity(primary_rows.len().min(secondary_by_key.len()));
        for mut row in primary_rows {
            match secondary_by_key.remove(&row.key()) {
                Some(other) => {
                    row.values.extend(other.values);
                    merged.push(row);
                }
                None => stats.unmatched_primary += 1,
            }
        }
        stats.unmatched_secondary = secondary_by_key.len();

        let mut metrics = primary.metrics;
        metrics.extend(secondary.metrics);

        info!(
            rows = merged.len(),
            unmatched_primary = stats.unmatched_primary,
            unmatched_secondary = stats.unmatched_secondary,
            "joined sources"
        );

        Ok((Dataset::new(metrics, merged), stats))
    }

    /// Drop exact duplicates; for rows sharing a key with different values
    /// keep the first occurrence.
    pub fn deduplicate(
        &self,
        rows: Vec<ObservationRow>,
        stats: &mut MergeStats,
    ) -> Vec<ObservationRow> {
        let mut first_seen: HashMap<ObservationKey, usize> = HashMap::with_capacity(rows.len());
        let mut kept: Vec<ObservationRow> = Vec::with_capacity(rows.len());

        for row in rows {
            let key = row.key();
            match first_seen.get(&key) {
                Some(&idx) if kept[idx].is_exact_duplicate_of(&row) => {
                    stats.exact_duplicates += 1;
                }
                Some(_) => {
                    warn!(
                        entity = %key.entity,
                        code = %key.code,
                        year = key.year,
                        "conflicting duplicate row dropped"
                    );
                    stats.record_conflict(key);
                }
                None => {
                    first_seen.insert(key, kept.len());
                    kept.push(row);
                }
            }
        }

        kept
    }
}

impl Default for DataMerger {
    fn default() -> Self {
        Self::new()
    }
}
