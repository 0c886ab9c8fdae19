mod stored_media;

pub use stored_media::*;
