use alloc::format;
use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// `detail` is whatever the service put in its error envelope.
    #[error("Network response was not ok (HTTP {status}){}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },
    #[error("Network request failed: {0}")]
    Transport(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Failed to parse puzzle JSON: no object found in generated text")]
    NoJsonObject,
    #[error("Failed to parse puzzle JSON: {0}")]
    InvalidPuzzle(String),
    #[error("Unexpected response from puzzle service: {0}")]
    InvalidEnvelope(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T, E = FetchError> = core::result::Result<T, E>;
