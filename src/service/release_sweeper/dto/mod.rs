mod release_sweeper_config;
mod sweep_report;

pub use release_sweeper_config::*;
pub use sweep_report::*;
