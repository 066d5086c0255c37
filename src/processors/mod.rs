pub mod data_merger;
pub mod dataset_loader;
pub mod integrity_checker;

pub use data_merger::{DataMerger, MergeStats};
pub use dataset_loader::{load_catalog, DatasetLoader};
pub use integrity_checker::{IntegrityChecker, IntegrityReport, SourceSummary};
