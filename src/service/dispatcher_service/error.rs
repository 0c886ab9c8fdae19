#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail api rejected message with status {status}")]
    Rejected { status: u16 },
}
