use thiserror::Error;

/// Fatal to the session: surfaced before any processing starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "GROQ_API_KEY not found (set the environment variable, add it to {secrets_hint}, or pass --api-key)"
    )]
    MissingCredential { secrets_hint: String },

    #[error("unknown model '{model}' (allowed: {})", .allowed.join(", "))]
    UnknownModel {
        model: String,
        allowed: Vec<&'static str>,
    },

    #[error("unknown provider '{0}' (expected: groq, fake)")]
    UnknownProvider(String),

    #[error("invalid setting {key}={value}: {reason}")]
    InvalidSetting {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failures of the completion call. Recovered inside the advisory pipeline.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("authentication failed (HTTP 401): {0}")]
    Unauthorized(String),

    #[error("rate limited (HTTP 429): {0}")]
    RateLimited(String),

    #[error("provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Connect failures, timeouts and 5xx answers are worth one more attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Transport(e) => e.is_connect() || e.is_timeout(),
            ProviderError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("history store lock poisoned")]
    LockPoisoned,
}
