pub struct CapsulesServiceConfig {
    pub max_audio_len: usize,
    pub max_image_len: usize,
}
