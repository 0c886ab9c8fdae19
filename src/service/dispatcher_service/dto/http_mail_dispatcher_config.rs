use std::time::Duration;

pub struct HttpMailDispatcherConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
    pub timeout: Duration,
}
