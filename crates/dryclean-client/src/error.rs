use thiserror::Error;

/// The single failure shape for backend and maps requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A 2xx body did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// An authenticated endpoint was called without a token.
    #[error("not authenticated")]
    NotAuthenticated,
}

impl ApiError {
    /// The message shown to the user in a toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Http(e) if e.is_timeout() => "The request timed out".to_string(),
            ApiError::Http(e) => format!("Unable to reach the server: {e}"),
            ApiError::Deserialize { .. } => "Unexpected response from the server".to_string(),
            ApiError::InvalidBaseUrl { .. } => "The client is misconfigured".to_string(),
            ApiError::NotAuthenticated => "Please log in to continue".to_string(),
        }
    }
}

/// Required fields of the location dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Address,
    Zip,
    State,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Address => write!(f, "address"),
            Field::Zip => write!(f, "zip"),
            Field::State => write!(f, "state"),
        }
    }
}

/// Submission blocked by required-field validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(Field),

    #[error("the dialog is not open")]
    NotOpen,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session file is not valid JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}
