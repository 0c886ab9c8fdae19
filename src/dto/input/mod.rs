mod new_capsule;

pub use new_capsule::*;
