mod dto;
mod release_sweeper;

pub use dto::{ReleaseSweeperConfig, SweepReport};
pub use release_sweeper::*;
