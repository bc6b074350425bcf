use thiserror::Error;

/// Main error type for Atlas
#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("You need to log in first: {0}")]
    AuthRequired(String),
}

/// Failures talking to the remote country directory
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("invalid directory url {0}")]
    InvalidUrl(String),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { status: u16, url: String },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DirectoryError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures persisting the session or favorites cookies
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("cookie '{name}' would be {size} bytes, over the {limit} byte limit")]
    CookieTooLarge {
        name: String,
        size: usize,
        limit: usize,
    },

    #[error("cookie jar IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cookie serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
