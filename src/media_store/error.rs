#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("mongo error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}
