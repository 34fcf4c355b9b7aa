#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Status API request failed: {0}")]
    Transport(String),
    #[error("Status API returned unexpected status {0}")]
    UnexpectedStatus(u16),
    #[error("Status API returned malformed body: {0}")]
    Decode(String),
    #[error("Status API response has unexpected shape: {0}")]
    Shape(String),
}
