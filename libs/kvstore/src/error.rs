use thiserror::Error;

/// Typed error for store adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store url '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error(transparent)]
    Redis(#[from] redis::RedisError),

    #[error("WRONGTYPE Operation against a key holding the wrong kind of value: {key}")]
    WrongType { key: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn wrong_type(key: impl Into<String>) -> Self {
        Self::WrongType { key: key.into() }
    }
}

/// Hide the password part of a store URL before it reaches the logs.
pub fn redact_credentials_in_url(raw: &str) -> String {
    if !raw.contains('@') {
        return raw.to_string();
    }
    match url::Url::parse(raw) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "***".to_string(),
    }
}
