use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("unknown form: {0}")]
    UnknownForm(String),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("invalid destination url")]
    Url(#[from] url::ParseError),
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unsupported submit method: {0}")]
    Method(String),
}
