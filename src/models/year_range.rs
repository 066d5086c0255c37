use serde::{Deserialize, Serialize};

/// Inclusive year window; an absent bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl YearRange {
    pub fn new(min: Option<i32>, max: Option<i32>) -> Self {
        Self { min, max }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min.map_or(true, |min| year >= min) && self.max.map_or(true, |max| year <= max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn is_ordered(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.min, self.max) {
            (None, None) => write!(f, "all years"),
            (Some(min), None) => write!(f, "{}..", min),
            (None, Some(max)) => write!(f, "..={}", max),
            (Some(min), Some(max)) => write!(f, "{}..={}", min, max),
        }
    }
}
