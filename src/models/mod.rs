pub mod chart;
pub mod continent;
pub mod dataset;
pub mod observation;
pub mod view_state;
pub mod year_range;

pub use chart::{
    AxisLabels, ChoroplethCell, ChoroplethFrame, ChoroplethMap, Figure, GeoLayout, LineChart,
    LineSeries, SeriesPoint,
};
pub use continent::{ContinentCatalog, ContinentSelection, GeoBounds, MapFraming};
pub use dataset::Dataset;
pub use observation::{ObservationKey, ObservationRow};
pub use view_state::{DashboardTab, ViewState};
pub use year_range::YearRange;
