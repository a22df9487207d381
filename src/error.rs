use thiserror::Error;

#[derive(Error, Debug)]
pub enum BentoolsError {
    #[error("bencode grammar error: {0}")]
    Grammar(String),

    #[error("truncated bencode input: {0}")]
    TruncatedInput(String),

    #[error("malformed bencode literal: {0}")]
    MalformedLiteral(String),

    #[error("unsupported value kind: {0}")]
    UnsupportedValue(String),

    #[error("invalid torrent data: {0}")]
    InvalidTorrent(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BentoolsError>;
