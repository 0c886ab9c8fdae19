mod capsule;

pub use capsule::*;
