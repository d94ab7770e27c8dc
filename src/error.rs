use thiserror::Error;

#[derive(Error, Debug)]
pub enum MedideskError {
    #[error("unknown resource '{0}'")]
    UnknownResource(String),

    #[error("{resource} record '{id}' not found")]
    RecordNotFound { resource: &'static str, id: String },

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("refusing to delete: {0} selected record(s) carry High severity")]
    GuardedDelete(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MedideskError>;
