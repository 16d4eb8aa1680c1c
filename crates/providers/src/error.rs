use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The backend could not be reached at all (connect, timeout, TLS).
    #[error("backend unreachable: {source}")]
    Unreachable {
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {status}: {body}")]
    Backend { status: u16, body: String },

    /// The backend answered 200 but the payload had no usable reply.
    #[error("malformed backend response: {0}")]
    Malformed(String),

    /// Invalid operating parameter for the offending call.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Whether the failure is transient (service-unavailable-class) rather
    /// than a permanent request or configuration problem.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Unreachable { source } => source.is_connect() || source.is_timeout(),
            Self::Backend { status, .. } => matches!(status, 429 | 503),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overloaded_backend_is_transient() {
        let err = ProviderError::Backend {
            status: 503,
            body: "overloaded".into(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn bad_request_is_not_transient() {
        let err = ProviderError::Backend {
            status: 400,
            body: "bad".into(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn configuration_is_not_transient() {
        assert!(!ProviderError::Configuration("chunk size".into()).is_transient());
    }
}
