use oil_co2_dashboard::config::DashboardConfig;
use oil_co2_dashboard::models::{ContinentCatalog, DashboardTab, Figure, ViewState, YearRange};
use oil_co2_dashboard::processors::{DatasetLoader, load_catalog};
use oil_co2_dashboard::utils::constants::{CO2_OIL_METRIC, OIL_PRODUCTION_METRIC, WORLD};
use oil_co2_dashboard::views::{build_choropleth, build_line_chart};
use oil_co2_dashboard::{Dashboard, DashboardError};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_config() -> DashboardConfig {
    DashboardConfig {
        primary_path: fixture("oil-production-by-country.csv"),
        secondary_path: Some(fixture("annual-co2-oil.csv")),
        ..DashboardConfig::default()
    }
}

#[test]
fn test_joined_table_has_one_row_per_key() {
    let (dataset, report) = DatasetLoader::from_config(&fixture_config())
        .load(None)
        .unwrap();

    assert_eq!(dataset.len(), 12);
    assert_eq!(
        dataset.metrics(),
        &[OIL_PRODUCTION_METRIC.to_string(), CO2_OIL_METRIC.to_string()]
    );

    let keys: HashSet<_> = dataset.rows().iter().map(|r| r.key()).collect();
    assert_eq!(keys.len(), dataset.len());

    assert_eq!(report.exact_duplicates, 1);
    assert_eq!(report.unmatched_primary, 1);
    assert_eq!(report.unmatched_secondary, 1);
    assert_eq!(report.rows_without_code, 1);
    assert!(report.is_clean());
}

#[test]
fn test_single_source_year_filter() {
    let config = DashboardConfig {
        secondary_path: None,
        min_year: Some(2001),
        ..fixture_config()
    };
    let (dataset, report) = DatasetLoader::from_config(&config).load(None).unwrap();

    assert!(dataset.rows().iter().all(|r| r.year == 2001));
    assert_eq!(dataset.metrics(), &[OIL_PRODUCTION_METRIC.to_string()]);
    assert_eq!(report.sources.len(), 1);
    assert_eq!(config.year_range(), YearRange::new(Some(2001), None));
}

#[test]
fn test_country_filter_returns_only_requested_entities() {
    let (dataset, _) = DatasetLoader::from_config(&fixture_config())
        .load(None)
        .unwrap();

    let rows = dataset.rows_for_entities(&["Canada", "France"]);
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.entity == "Canada" || r.entity == "France"));

    let chart = build_line_chart(&dataset, &["Canada", "France"], CO2_OIL_METRIC);
    assert_eq!(chart.series.len(), 2);
    assert!(chart.series.iter().all(|s| s.len() == 2));
    assert_eq!(chart.series[0].name, "Canada");
    assert_eq!(chart.series[0].points[0].value, 210000000.0);
}

#[test]
fn test_continent_filter_matches_mapping() {
    let (dataset, _) = DatasetLoader::from_config(&fixture_config())
        .load(None)
        .unwrap();
    let catalog = load_catalog(Some(fixture("continents.csv").as_path())).unwrap();

    let world = build_choropleth(&dataset, &catalog, WORLD, CO2_OIL_METRIC).unwrap();
    assert_eq!(world.cell_count(), dataset.len());

    let europe = build_choropleth(&dataset, &catalog, "Europe", CO2_OIL_METRIC).unwrap();
    let expected = dataset
        .rows()
        .iter()
        .filter(|r| catalog.continent_of(&r.entity) == Some("Europe"))
        .count();
    assert_eq!(europe.cell_count(), expected);
    assert_eq!(europe.cell_count(), 5);
    assert!(europe
        .frames
        .iter()
        .flat_map(|f| f.cells.iter())
        .all(|c| ["France", "Germany", "Norway"].contains(&c.entity.as_str())));
    assert_eq!(europe.color_range, [0.0, 330000000.0]);
}

#[test]
fn test_unknown_continent_is_an_error() {
    let (dataset, _) = DatasetLoader::from_config(&fixture_config())
        .load(None)
        .unwrap();

    let err = build_choropleth(&dataset, &ContinentCatalog::builtin(), "Middle Earth", CO2_OIL_METRIC)
        .unwrap_err();
    assert!(matches!(err, DashboardError::UnknownContinent { .. }));
}

#[test]
fn test_missing_file_fails_fast() {
    let config = DashboardConfig {
        primary_path: fixture("does-not-exist.csv"),
        ..fixture_config()
    };

    let err = Dashboard::load(config, None).err().unwrap();
    assert!(err.to_string().contains("does-not-exist.csv"));
}

#[test]
fn test_view_state_round_trip_renders_same_figure() {
    let (dashboard, _) = Dashboard::load(fixture_config(), None).unwrap();

    let state = ViewState::default()
        .with_tab(DashboardTab::ChoroplethMap)
        .with_continent("Asia");
    let restored = ViewState::from_json(&state.to_json().unwrap()).unwrap();

    let figure = dashboard.render(&restored).unwrap();
    assert_eq!(figure, Figure::Choropleth(dashboard.choropleth("Asia").unwrap()));

    match figure {
        Figure::Choropleth(map) => {
            assert_eq!(map.tuples(), vec![("CHN", 2000, Some(700000000.0)), ("CHN", 2001, Some(730000000.0))]);
        }
        Figure::Line(_) => panic!("expected a choropleth"),
    }
}

#[test]
fn test_line_chart_from_two_row_fixture() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("two.csv");
    std::fs::write(
        &path,
        "Entity,Code,Year,Oil production (TWh)\nNorway,NOR,2000,1\nChad,TCD,2000,2\nNorway,NOR,2001,3\nChad,TCD,2001,4\n",
    )
    .unwrap();

    let (dataset, _) = DatasetLoader::new(&path).load(None).unwrap();
    let chart = build_line_chart(&dataset, &["Chad", "Norway"], OIL_PRODUCTION_METRIC);

    assert_eq!(chart.series.len(), 2);
    assert_eq!(chart.series[0].name, "Chad");
    assert_eq!(chart.series[0].years(), vec![2000, 2001]);
    assert_eq!(chart.series[1].name, "Norway");
    assert_eq!(chart.series[1].points.iter().map(|p| p.value).collect::<Vec<_>>(), vec![1.0, 3.0]);
}
