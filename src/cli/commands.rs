use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, DashboardConfig};
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::models::ViewState;
use crate::processors::{IntegrityChecker, IntegrityReport};
use crate::utils::filename::generate_default_chart_filename;
use crate::utils::progress::ProgressReporter;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` wins over the flags.
pub fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// File config plus command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = load_config(cli.config.as_deref())?;

    if let Some(primary) = &cli.primary {
        config.primary_path = primary.clone();
    }
    if let Some(secondary) = &cli.secondary {
        config.secondary_path = Some(secondary.clone());
    }
    if cli.single_source {
        config.secondary_path = None;
    }
    if cli.min_year.is_some() {
        config.min_year = cli.min_year;
    }
    if cli.max_year.is_some() {
        config.max_year = cli.max_year;
    }
    if let Some(continents) = &cli.continents {
        config.continents_path = Some(continents.clone());
    }

    validator::Validate::validate(&config)?;
    Ok(config)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    let progress = ProgressReporter::new_spinner("Loading dashboard data...", cli.quiet);
    let (dashboard, report) = Dashboard::load(config, Some(&progress))?;

    match cli.command {
        Commands::Line {
            countries,
            metric,
            output,
        } => {
            let metric = metric.unwrap_or_else(|| dashboard.config().default_metric.clone());
            let chart = dashboard.line_chart(&countries, &metric);
            info!(
                series = chart.series.len(),
                points = chart.point_count(),
                "line chart ready"
            );
            emit(&chart, output, "line-chart")?;
        }

        Commands::Map { continent, output } => {
            let continent =
                continent.unwrap_or_else(|| dashboard.config().default_continent.clone());
            let map = dashboard.choropleth(&continent)?;
            info!(
                continent = %continent,
                frames = map.frames.len(),
                cells = map.cell_count(),
                "choropleth map ready"
            );
            emit(&map, output, "choropleth-map")?;
        }

        Commands::Render { state, output } => {
            let state = ViewState::from_file(&state)?;
            let figure = dashboard.render(&state)?;
            info!(title = figure.title(), empty = figure.is_empty(), "figure ready");
            emit(&figure, output, "figure")?;
        }

        Commands::Options => {
            emit(&dashboard.options(), None, "options")?;
        }

        Commands::Validate { json } => {
            if json {
                emit(&report, None, "integrity-report")?;
            } else {
                println!("{}", IntegrityChecker::new().generate_summary(&report));
                println!("{}", validation_banner(&report));
            }

            if report.is_clean() {
                info!("all rows passed integrity checks");
            } else {
                warn!(
                    conflicting = report.conflicting_duplicates,
                    "conflicting duplicate rows dropped"
                );
            }
        }
    }

    Ok(())
}

fn validation_banner(report: &IntegrityReport) -> String {
    if report.is_clean() {
        "✅ All rows passed integrity checks".to_string()
    } else {
        format!(
            "⚠️  Dropped {} conflicting duplicate rows",
            report.conflicting_duplicates
        )
    }
}

/// Write `value` as pretty JSON to stdout, the given file, or a dated default file.
fn emit<T: Serialize>(value: &T, output: Option<Option<PathBuf>>, chart: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    let path = match output {
        None => {
            println!("{}", json);
            return Ok(());
        }
        Some(Some(path)) => path,
        Some(None) => generate_default_chart_filename(chart),
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, json)?;
    info!("Wrote {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::Builder;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = config_file("primary_path = \"file.csv\"\nmin_year = 1965\n");
        let path = file.path().to_str().unwrap();

        let cli = parse(&[
            "oil-co2-dashboard",
            "--config",
            path,
            "--primary",
            "flag.csv",
            "--min-year",
            "1990",
            "--single-source",
            "options",
        ]);
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.primary_path, PathBuf::from("flag.csv"));
        assert_eq!(config.min_year, Some(1990));
        assert_eq!(config.secondary_path, None);
    }

    #[test]
    fn test_file_values_kept_without_flags() {
        let file = config_file("min_year = 1965\nsecondary_path = \"co2.csv\"\n");
        let cli = parse(&[
            "oil-co2-dashboard",
            "validate",
            "--config",
            file.path().to_str().unwrap(),
        ]);
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.min_year, Some(1965));
        assert_eq!(config.secondary_path, Some(PathBuf::from("co2.csv")));
    }

    #[test]
    fn test_year_bounds_checked_after_overrides() {
        let file = config_file("min_year = 1965\nmax_year = 2000\n");
        let cli = parse(&[
            "oil-co2-dashboard",
            "--config",
            file.path().to_str().unwrap(),
            "--min-year",
            "2010",
            "options",
        ]);

        let err = resolve_config(&cli).unwrap_err();
        assert!(matches!(err, crate::error::DashboardError::Validation(_)));
    }

    #[test]
    fn test_single_source_conflicts_with_secondary() {
        assert!(Cli::try_parse_from([
            "oil-co2-dashboard",
            "--secondary",
            "co2.csv",
            "--single-source",
            "options",
        ])
        .is_err());
    }

    #[test]
    fn test_validation_banner() {
        let mut report = IntegrityReport::default();
        assert!(validation_banner(&report).contains("All rows passed"));

        report.conflicting_duplicates = 3;
        assert!(validation_banner(&report).contains("Dropped 3"));
    }
}
