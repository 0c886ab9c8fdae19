mod capsule_find_entity;
mod capsule_insert_entity;
mod unix_micros;

pub use capsule_find_entity::*;
pub use capsule_insert_entity::*;
pub use unix_micros::*;
