use crate::error::{DashboardError, Result};
use crate::models::{ObservationRow, YearRange};
use crate::utils::constants::{CODE_COLUMN, ENTITY_COLUMN, MISSING_VALUE_MARKERS, YEAR_COLUMN};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One parsed source file, before any joining.
#[derive(Debug, Clone)]
pub struct ObservationTable {
    pub path: PathBuf,
    pub metrics: Vec<String>,
    pub rows: Vec<ObservationRow>,
    pub rows_read: usize,
    pub rows_outside_years: usize,
}

/// Reads `Entity,Code,Year,<metric>...` CSV files.
pub struct ObservationReader {
    year_range: YearRange,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            year_range: YearRange::unbounded(),
        }
    }

    pub fn with_year_range(year_range: YearRange) -> Self {
        Self { year_range }
    }

    /// Read and parse a whole file. Any malformed row fails the read.
    pub fn read_table(&self, path: &Path) -> Result<ObservationTable> {
        let bytes = std::fs::read(path).map_err(|source| DashboardError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let text = decode_text(&bytes, path);
        self.parse_table(&text, path)
    }

    /// Parse CSV text; `path` is only used in error messages.
    pub fn parse_table(&self, text: &str, path: &Path) -> Result<ObservationTable> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DashboardError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        };
        let entity_idx = column(ENTITY_COLUMN)?;
        let code_idx = column(CODE_COLUMN)?;
        let year_idx = column(YEAR_COLUMN)?;

        let metric_columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != entity_idx && *i != code_idx && *i != year_idx)
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        let mut rows = Vec::new();
        let mut rows_read = 0;
        let mut rows_outside_years = 0;

        for result in reader.records() {
            let record = result.map_err(|e| DashboardError::InvalidFormat {
                path: path.to_path_buf(),
                line: e.position().map_or(0, |p| p.line()),
                message: e.to_string(),
            })?;
            let line = record.position().map_or(0, |p| p.line());
            rows_read += 1;

            let invalid = |message: String| DashboardError::InvalidFormat {
                path: path.to_path_buf(),
                line,
                message,
            };

            let year_field = record.get(year_idx).unwrap_or("");
            let year = year_field
                .parse::<i32>()
                .map_err(|_| invalid(format!("invalid year '{}'", year_field)))?;

            let entity = record.get(entity_idx).unwrap_or("");
            if entity.is_empty() {
                return Err(invalid("empty entity name".to_string()));
            }

            let mut values = Vec::with_capacity(metric_columns.len());
            for (idx, name) in &metric_columns {
                let field = record.get(*idx).unwrap_or("");
                values.push(parse_metric(field).ok_or_else(|| {
                    invalid(format!("invalid value '{}' in column '{}'", field, name))
                })?);
            }

            // The window only drops well-formed rows.
            if !self.year_range.contains(year) {
                rows_outside_years += 1;
                continue;
            }

            rows.push(ObservationRow::new(
                entity.to_string(),
                record.get(code_idx).unwrap_or("").to_string(),
                year,
                values,
            ));
        }

        debug!(
            path = %path.display(),
            rows = rows.len(),
            skipped = rows_outside_years,
            "parsed observation table"
        );

        Ok(ObservationTable {
            path: path.to_path_buf(),
            metrics: metric_columns.into_iter().map(|(_, name)| name).collect(),
            rows,
            rows_read,
            rows_outside_years,
        })
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Empty cell or a missing-value marker → `Some(None)`; anything that is
/// not a finite number → `None`.
fn parse_metric(field: &str) -> Option<Option<f64>> {
    if field.is_empty() || MISSING_VALUE_MARKERS.iter().any(|m| m.eq_ignore_ascii_case(field)) {
        return Some(None);
    }
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(Some(value)),
        _ => None,
    }
}

/// UTF-8 with an optional BOM; anything else is read as Windows-1252.
pub(crate) fn decode_text<'a>(bytes: &'a [u8], path: &Path) -> Cow<'a, str> {
    let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return text;
    }

    warn!(
        path = %path.display(),
        "file is not valid UTF-8, decoding as Windows-1252"
    );
    let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const OIL_CSV: &str = "\
Entity,Code,Year,Oil production (TWh)
Africa,,1990,3500.5
Norway,NOR,1990,950.1
Norway,NOR,1991,
";

    #[test]
    fn test_parse_table() {
        let reader = ObservationReader::new();
        let table = reader.parse_table(OIL_CSV, Path::new("oil.csv")).unwrap();

        assert_eq!(table.metrics, vec!["Oil production (TWh)".to_string()]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows_read, 3);

        assert_eq!(table.rows[0].entity, "Africa");
        assert!(!table.rows[0].has_code());
        assert_eq!(table.rows[1].value(0), Some(950.1));
        assert_eq!(table.rows[2].value(0), None);
    }

    #[test]
    fn test_year_filter() {
        let reader = ObservationReader::with_year_range(YearRange::new(Some(1991), None));
        let table = reader.parse_table(OIL_CSV, Path::new("oil.csv")).unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].year, 1991);
        assert_eq!(table.rows_outside_years, 2);
    }

    #[test]
    fn test_missing_key_column() {
        let reader = ObservationReader::new();
        let err = reader
            .parse_table("Entity,Year,x\nNorway,1990,1\n", Path::new("bad.csv"))
            .unwrap_err();

        assert!(matches!(err, DashboardError::MissingColumn { ref column, .. } if column == "Code"));
        assert!(err.to_string().contains("bad.csv"));
    }

    #[test]
    fn test_malformed_cells() {
        let reader = ObservationReader::new();

        let err = reader
            .parse_table("Entity,Code,Year,x\nNorway,NOR,19x0,1\n", Path::new("a.csv"))
            .unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("19x0"));

        let err = reader
            .parse_table("Entity,Code,Year,x\nNorway,NOR,1990,lots\n", Path::new("a.csv"))
            .unwrap_err();
        assert!(err.to_string().contains("'lots'"));

        let err = reader
            .parse_table("Entity,Code,Year,x\nNorway,NOR,1990\n", Path::new("a.csv"))
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidFormat { .. }));
    }

    #[test]
    fn test_missing_value_markers() {
        let reader = ObservationReader::new();
        let table = reader
            .parse_table(
                "Entity,Code,Year,x\nChad,TCD,2000,NaN\nChad,TCD,2001,nan\nChad,TCD,2002,NA\nChad,TCD,2003,N/A\nChad,TCD,2004,null\nChad,TCD,2005,2.5\n",
                Path::new("a.csv"),
            )
            .unwrap();

        assert_eq!(table.rows.len(), 6);
        assert!(table.rows[..5].iter().all(|r| r.value(0).is_none()));
        assert_eq!(table.rows[5].value(0), Some(2.5));
    }

    #[test]
    fn test_infinite_values_rejected() {
        let reader = ObservationReader::new();
        for cell in ["inf", "-infinity", "1e999"] {
            let csv = format!("Entity,Code,Year,x\nChad,TCD,2000,{}\n", cell);
            let err = reader.parse_table(&csv, Path::new("a.csv")).unwrap_err();
            assert!(err.to_string().contains(cell), "{} should be rejected", cell);
        }
    }

    #[test]
    fn test_malformed_row_outside_year_window() {
        let reader = ObservationReader::with_year_range(YearRange::new(Some(2000), None));

        let err = reader
            .parse_table("Entity,Code,Year,x\nNorway,NOR,1990,garbage\nNorway,NOR,2000,1\n", Path::new("a.csv"))
            .unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("'garbage'"));

        let err = reader
            .parse_table("Entity,Code,Year,x\n,NOR,1990,1\nNorway,NOR,2000,1\n", Path::new("a.csv"))
            .unwrap_err();
        assert!(err.to_string().contains("empty entity"));
    }

    #[test]
    fn test_read_file_with_bom() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"\xEF\xBB\xBFEntity,Code,Year,Annual CO\xE2\x82\x82 emissions from oil\n")?;
        writeln!(temp_file, "Canada,CAN,2000,120.0")?;

        let table = ObservationReader::new().read_table(temp_file.path())?;
        assert_eq!(table.metrics, vec!["Annual CO₂ emissions from oil".to_string()]);
        assert_eq!(table.rows[0].entity, "Canada");

        Ok(())
    }

    #[test]
    fn test_latin1_fallback() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"Entity,Code,Year,x\nCura\xE7ao,CUW,2000,1.0\n")?;

        let table = ObservationReader::new().read_table(temp_file.path())?;
        assert_eq!(table.rows[0].entity, "Curaçao");

        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = ObservationReader::new()
            .read_table(Path::new("/nonexistent/oil.csv"))
            .unwrap_err();
        assert!(matches!(err, DashboardError::FileOpen { .. }));
        assert!(err.to_string().contains("/nonexistent/oil.csv"));
    }
}
