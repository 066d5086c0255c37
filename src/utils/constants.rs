/// Key column headers shared by every source file
pub const ENTITY_COLUMN: &str = "Entity";
pub const CODE_COLUMN: &str = "Code";
pub const YEAR_COLUMN: &str = "Year";
pub const CONTINENT_COLUMN: &str = "Continent";

/// Cells read as missing, compared case-insensitively
pub const MISSING_VALUE_MARKERS: &[&str] = &["NaN", "NA", "N/A", "null"];

/// Source file names
pub const OIL_PRODUCTION_FILE: &str = "oil-production-by-country.csv";
pub const CO2_OIL_FILE: &str = "annual-co2-oil.csv";
pub const CONFIG_FILE_STEM: &str = "dashboard";

/// Metric columns
pub const CO2_OIL_METRIC: &str = "Annual CO₂ emissions from oil";
pub const OIL_PRODUCTION_METRIC: &str = "Oil production (TWh)";

/// Selection defaults
pub const DEFAULT_METRIC: &str = CO2_OIL_METRIC;
pub const DEFAULT_COUNTRY: &str = "United States";
pub const WORLD: &str = "World";

/// Map styling
pub const MAP_PROJECTION: &str = "natural earth";
pub const COASTLINE_COLOR: &str = "Black";
pub const MAP_COLOR_LABEL: &str = "CO₂ Emissions (t)";
pub const MAP_COLOR_SCALE: &[&str] = &["gray", "yellow", "green", "blue", "violet", "indigo"];

/// Line chart labels
pub const YEAR_LABEL: &str = "Year";
pub const COUNTRY_LABEL: &str = "Country";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "DASHBOARD";

/// Directory for dated output files
pub const OUTPUT_DIR: &str = "output";

/// Conflicting duplicate keys kept in the integrity report
pub const MAX_REPORTED_CONFLICTS: usize = 10;
