pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
pub use commands::{init_logging, resolve_config, run};
