use serde::{Deserialize, Serialize};

/// Join key of an observation: country name, ISO code and year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObservationKey {
    pub entity: String,
    pub code: String,
    pub year: i32,
}

/// One (Entity, Code, Year) row with its metric values.
///
/// `values` is positional and lines up with the metric names of the table
/// the row belongs to. A missing cell is `None`, never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRow {
    pub entity: String,
    pub code: String,
    pub year: i32,
    pub values: Vec<Option<f64>>,
}

impl ObservationRow {
    pub fn new(entity: String, code: String, year: i32, values: Vec<Option<f64>>) -> Self {
        Self {
            entity,
            code,
            year,
            values,
        }
    }

    pub fn key(&self) -> ObservationKey {
        ObservationKey {
            entity: self.entity.clone(),
            code: self.code.clone(),
            year: self.year,
        }
    }

    /// Aggregate regions ("World", "Africa", ...) carry no ISO code.
    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }

    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Two rows are exact duplicates when key and every value match.
    /// The reader maps NaN cells to `None` and rejects infinities, so
    /// stored values are always finite.
    pub fn is_exact_duplicate_of(&self, other: &ObservationRow) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_lookup() {
        let row = ObservationRow::new(
            "Norway".to_string(),
            "NOR".to_string(),
            2001,
            vec![Some(1.5), None],
        );

        assert_eq!(row.value(0), Some(1.5));
        assert_eq!(row.value(1), None);
        assert_eq!(row.value(7), None);
        assert_eq!(row.missing_count(), 1);
        assert!(row.has_code());
    }

    #[test]
    fn test_exact_duplicate() {
        let a = ObservationRow::new("Chad".to_string(), "TCD".to_string(), 2010, vec![Some(3.0)]);
        let b = a.clone();
        let c = ObservationRow::new("Chad".to_string(), "TCD".to_string(), 2010, vec![Some(4.0)]);

        assert!(a.is_exact_duplicate_of(&b));
        assert!(!a.is_exact_duplicate_of(&c));
        assert_eq!(a.key(), c.key());
    }
}
