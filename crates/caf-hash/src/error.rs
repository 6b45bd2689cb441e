/// Errors produced by hashing and digest parsing.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("invalid hex character at position {position}: '{character}'")]
    InvalidHex { position: usize, character: char },

    #[error("invalid hex length: expected {expected}, got {actual}")]
    InvalidHexLength { expected: usize, actual: usize },

    #[error("SHA-1 collision detected")]
    Sha1Collision,

    #[error("failed to read content: {0}")]
    Io(#[from] std::io::Error),
}
