///
/// Capsule creation request as received from the user, not validated yet
///
#[derive(Debug, Default)]
pub struct NewCapsule {
    pub title: String,
    pub capsule_type: String,

    /// RFC 3339 timestamp
    pub publish_at: String,

    pub text_content: Option<String>,
    pub media: Option<MediaPayload>,
    pub email: Option<String>,
}

pub struct MediaPayload {
    pub filename: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for MediaPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaPayload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
