use thiserror::Error;

#[derive(Error, Debug)]
pub enum PushError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Service worker registration failed: {0}")]
    Registration(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Push subscription keys missing: {0}")]
    MissingKeys(String),

    #[error("Invalid application server key: {0}")]
    InvalidKey(#[from] base64::DecodeError),

    #[error("Backend request failed: {status} {status_text}")]
    Backend { status: u16, status_text: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("At least one device id is required")]
    NoDeviceIds,
}

pub type Result<T, E = PushError> = std::result::Result<T, E>;
