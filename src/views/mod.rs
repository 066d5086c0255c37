pub mod choropleth;
pub mod line_chart;

pub use choropleth::build_choropleth;
pub use line_chart::build_line_chart;
