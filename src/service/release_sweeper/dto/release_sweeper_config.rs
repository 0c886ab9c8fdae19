use std::time::Duration;

pub struct ReleaseSweeperConfig {
    pub interval: Duration,
}
