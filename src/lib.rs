pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod views;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardOptions};
pub use error::{DashboardError, Result};
