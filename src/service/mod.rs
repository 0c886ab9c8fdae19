pub mod capsules_service;
pub mod dispatcher_service;
pub mod release_sweeper;
