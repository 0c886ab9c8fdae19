pub struct StoredMedia {
    pub content_type: String,
    pub bytes: Vec<u8>,
}
