mod capsules_service;
mod capsules_service_impl;
mod dto;

pub use capsules_service::*;
pub use capsules_service_impl::*;
pub use dto::CapsulesServiceConfig;
