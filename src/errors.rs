use thiserror::Error;

/// Detail used when an error body carries no usable `detail` field.
pub const UNKNOWN_ERROR_DETAIL: &str = "Unknown error";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response. The detail comes from the error body's `detail`
    /// field, falling back to [`UNKNOWN_ERROR_DETAIL`].
    #[error("{detail}")]
    Status { status: u16, detail: String },
    #[error("Error talking to server: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Error decoding response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the response, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read configuration file `{path}`: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Could not parse configuration file `{path}`: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Path `{0}` could not be resolved")]
    Canonicalize(#[from] std::io::Error),
    #[error("Path to user's configuration directory could not be detected")]
    ConfigDir,
}
