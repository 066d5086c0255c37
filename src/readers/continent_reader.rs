use crate::error::{DashboardError, Result};
use crate::readers::observation_reader::decode_text;
use crate::utils::constants::{CONTINENT_COLUMN, ENTITY_COLUMN};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct MembershipRecord {
    #[serde(rename = "Entity")]
    entity: String,
    #[serde(rename = "Continent")]
    continent: String,
}

/// Reads an `Entity,Continent` mapping file.
pub struct ContinentReader;

impl ContinentReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_membership(&self, path: &Path) -> Result<HashMap<String, String>> {
        let bytes = std::fs::read(path).map_err(|source| DashboardError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_membership(&decode_text(&bytes, path), path)
    }

    pub fn parse_membership(&self, text: &str, path: &Path) -> Result<HashMap<String, String>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        for column in [ENTITY_COLUMN, CONTINENT_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(DashboardError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                });
            }
        }

        let mut membership = HashMap::new();
        for result in reader.deserialize::<MembershipRecord>() {
            let record = result.map_err(|e| DashboardError::InvalidFormat {
                path: path.to_path_buf(),
                line: e.position().map_or(0, |p| p.line()),
                message: e.to_string(),
            })?;

            if let Some(previous) = membership.insert(record.entity.clone(), record.continent.clone()) {
                if previous != record.continent {
                    warn!(
                        entity = %record.entity,
                        previous = %previous,
                        current = %record.continent,
                        "entity mapped to more than one continent, keeping the last"
                    );
                }
            }
        }

        Ok(membership)
    }
}

impl Default for ContinentReader {
    fn default() -> Self {
        Self::new()
    }
}
