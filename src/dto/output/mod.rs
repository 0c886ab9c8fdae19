mod created_capsule;
mod public_capsule;

pub use created_capsule::*;
pub use public_capsule::*;
