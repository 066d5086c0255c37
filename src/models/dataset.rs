use crate::models::ObservationRow;
use std::collections::{BTreeSet, HashSet};

/// The cleaned, immutable observation table the views read from.
///
/// Rows are sorted by entity, then year, then code. Every row's `values`
/// lines up with `metrics`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    metrics: Vec<String>,
    rows: Vec<ObservationRow>,
}

impl Dataset {
    pub fn new(metrics: Vec<String>, mut rows: Vec<ObservationRow>) -> Self {
        rows.sort_by(|a, b| {
            a.entity
                .cmp(&b.entity)
                .then_with(|| a.year.cmp(&b.year))
                .then_with(|| a.code.cmp(&b.code))
        });
        Self { metrics, rows }
    }

    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn rows(&self) -> &[ObservationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn metric_index(&self, metric: &str) -> Option<usize> {
        self.metrics.iter().position(|m| m == metric)
    }

    pub fn contains_metric(&self, metric: &str) -> bool {
        self.metric_index(metric).is_some()
    }

    pub fn metric_value(&self, row: &ObservationRow, metric: &str) -> Option<f64> {
        self.metric_index(metric).and_then(|i| row.value(i))
    }

    /// Unique entity names in sorted order.
    pub fn entities(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|r| r.entity.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.rows.iter().map(|r| r.year).min()?;
        let max = self.rows.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    /// Rows whose entity is one of `entities`.
    pub fn rows_for_entities<'a, S: AsRef<str>>(&'a self, entities: &[S]) -> Vec<&'a ObservationRow> {
        let wanted: HashSet<&str> = entities.iter().map(|e| e.as_ref()).collect();
        self.rows
            .iter()
            .filter(|r| wanted.contains(r.entity.as_str()))
            .collect()
    }

    /// Number of missing cells per metric, in metric order.
    pub fn missing_by_metric(&self) -> Vec<(String, usize)> {
        self.metrics
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let missing = self.rows.iter().filter(|r| r.value(i).is_none()).count();
                (name.clone(), missing)
            })
            .collect()
    }
}
