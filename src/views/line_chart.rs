use crate::models::{AxisLabels, Dataset, LineChart, LineSeries, SeriesPoint};
use crate::utils::constants::{COUNTRY_LABEL, YEAR_LABEL};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Build the per-country line chart for `metric`.
///
/// Series follow the order of `countries`; a country with no rows, or only
/// missing values, gets no series. An unknown metric gives an empty chart.
pub fn build_line_chart<S: AsRef<str>>(dataset: &Dataset, countries: &[S], metric: &str) -> LineChart {
    let mut chart = LineChart {
        title: format!("{} Change Over Time Due to Oil Production", metric),
        metric: metric.to_string(),
        labels: AxisLabels {
            x: YEAR_LABEL.to_string(),
            y: format!("{} (t)", metric),
            legend: COUNTRY_LABEL.to_string(),
        },
        series: Vec::new(),
    };

    let Some(metric_idx) = dataset.metric_index(metric) else {
        warn!(metric, "unknown metric, rendering empty line chart");
        return chart;
    };

    let mut by_country: HashMap<&str, Vec<SeriesPoint>> = HashMap::new();
    for row in dataset.rows_for_entities(countries) {
        if let Some(value) = row.value(metric_idx) {
            by_country
                .entry(row.entity.as_str())
                .or_default()
                .push(SeriesPoint {
                    year: row.year,
                    value,
                });
        }
    }

    for country in countries {
        let country = country.as_ref();
        if let Some(mut points) = by_country.remove(country) {
            points.sort_by_key(|p| p.year);
            chart.series.push(LineSeries {
                name: country.to_string(),
                points,
            });
        }
    }

    debug!(
        metric,
        requested = countries.len(),
        series = chart.series.len(),
        points = chart.point_count(),
        "built line chart"
    );

    chart
}
