use crate::error::Result;
use crate::models::{
    ChoroplethCell, ChoroplethFrame, ChoroplethMap, ContinentCatalog, Dataset, GeoLayout,
};
use crate::utils::constants::{COASTLINE_COLOR, MAP_COLOR_LABEL, MAP_COLOR_SCALE, MAP_PROJECTION};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Build the animated choropleth of `metric` for `continent`.
///
/// "World" keeps every row; any other continent keeps the rows whose
/// entity the catalog maps to it. A continent the catalog does not know is
/// an error. An unknown metric gives a framed map with no frames.
pub fn build_choropleth(
    dataset: &Dataset,
    catalog: &ContinentCatalog,
    continent: &str,
    metric: &str,
) -> Result<ChoroplethMap> {
    let framing = catalog.framing(continent)?;
    let selection = catalog.selection(continent)?;

    let mut map = ChoroplethMap {
        title: format!("CO₂ Emissions from Oil in {}", continent),
        continent: continent.to_string(),
        metric: metric.to_string(),
        color_label: MAP_COLOR_LABEL.to_string(),
        color_scale: MAP_COLOR_SCALE.iter().map(|c| c.to_string()).collect(),
        color_range: [0.0, 0.0],
        geo: GeoLayout {
            projection: MAP_PROJECTION.to_string(),
            show_coastlines: true,
            coastline_color: COASTLINE_COLOR.to_string(),
            bounds: framing.bounds(),
        },
        frames: Vec::new(),
    };

    let Some(metric_idx) = dataset.metric_index(metric) else {
        warn!(metric, continent, "unknown metric, rendering empty map");
        return Ok(map);
    };

    let mut by_year: BTreeMap<i32, Vec<ChoroplethCell>> = BTreeMap::new();
    let mut max_value: Option<f64> = None;

    for row in dataset.rows().iter().filter(|r| selection.admits(&r.entity)) {
        let value = row.value(metric_idx);
        if let Some(v) = value {
            max_value = Some(max_value.map_or(v, |m| m.max(v)));
        }
        by_year.entry(row.year).or_default().push(ChoroplethCell {
            code: row.code.clone(),
            entity: row.entity.clone(),
            value,
        });
    }

    map.color_range = [0.0, max_value.unwrap_or(0.0)];
    map.frames = by_year
        .into_iter()
        .map(|(year, cells)| ChoroplethFrame { year, cells })
        .collect();

    debug!(
        continent,
        metric,
        frames = map.frames.len(),
        cells = map.cell_count(),
        "built choropleth"
    );

    Ok(map)
}
