use crate::utils::constants::OUTPUT_DIR;
use chrono::{Datelike, Local};
use std::path::PathBuf;

/// Generate default chart filename with format: {chart}-{YYMMDD}.json
pub fn generate_default_chart_filename(chart: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!("{}-{:02}{:02}{:02}.json", chart, year, month, day);
    PathBuf::from(OUTPUT_DIR).join(filename)
}
