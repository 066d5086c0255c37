use crate::models::GeoBounds;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: f64,
}

/// One country's line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl LineSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.year).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
    pub legend: String,
}

/// Line chart of one metric over time, one series per country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    pub title: String,
    pub metric: String,
    pub labels: AxisLabels,
    pub series: Vec<LineSeries>,
}

impl LineChart {
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(LineSeries::is_empty)
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(LineSeries::len).sum()
    }

    pub fn series_named(&self, name: &str) -> Option<&LineSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Smallest and largest value over every point.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.value))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethCell {
    pub code: String,
    pub entity: String,
    pub value: Option<f64>,
}

/// Every cell shaded in one animation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethFrame {
    pub year: i32,
    pub cells: Vec<ChoroplethCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLayout {
    pub projection: String,
    pub show_coastlines: bool,
    pub coastline_color: String,
    #[serde(flatten)]
    pub bounds: GeoBounds,
}

/// Animated choropleth: one frame per year, framed on a continent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethMap {
    pub title: String,
    pub continent: String,
    pub metric: String,
    pub color_label: String,
    pub color_scale: Vec<String>,
    pub color_range: [f64; 2],
    pub geo: GeoLayout,
    pub frames: Vec<ChoroplethFrame>,
}

impl ChoroplethMap {
    pub fn is_empty(&self) -> bool {
        self.frames.iter().all(|f| f.cells.is_empty())
    }

    pub fn cell_count(&self) -> usize {
        self.frames.iter().map(|f| f.cells.len()).sum()
    }

    pub fn years(&self) -> Vec<i32> {
        self.frames.iter().map(|f| f.year).collect()
    }

    /// Flattened (code, year, value) tuples in frame order.
    pub fn tuples(&self) -> Vec<(&str, i32, Option<f64>)> {
        self.frames
            .iter()
            .flat_map(|f| f.cells.iter().map(move |c| (c.code.as_str(), f.year, c.value)))
            .collect()
    }
}

/// Output of rendering a view state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Figure {
    Line(LineChart),
    Choropleth(ChoroplethMap),
}

impl Figure {
    pub fn title(&self) -> &str {
        match self {
            Figure::Line(chart) => &chart.title,
            Figure::Choropleth(map) => &map.title,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Figure::Line(chart) => chart.is_empty(),
            Figure::Choropleth(map) => map.is_empty(),
        }
    }
}
