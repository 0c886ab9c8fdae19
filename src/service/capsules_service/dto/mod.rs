mod capsules_service_config;

pub use capsules_service_config::*;
