use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    KeyLoad(#[from] kagi_pkcs::KeyLoadError),

    #[error("private key error: {0}")]
    Pkcs(#[from] kagi_pkcs::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("environment variable {0} is not set")]
    MissingPasswordEnv(String),
}

pub type Result<T> = std::result::Result<T, Error>;
