pub mod continent_reader;
pub mod observation_reader;

pub use continent_reader::ContinentReader;
pub use observation_reader::{ObservationReader, ObservationTable};
