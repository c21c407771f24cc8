use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur while building or running a chunking strategy
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// Unknown strategy name, or a strategy requested without a collaborator it needs
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed strategy option values
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// Embedding provider failure, passed through as-is
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ChunkerError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Failure reported by an embedding provider
#[derive(Error, Debug)]
#[error("Provider error{}: {message}", provider_label(.provider))]
pub struct ProviderError {
    /// Name of the provider that failed, when known
    pub provider: Option<String>,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            provider: None,
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

fn provider_label(provider: &Option<String>) -> String {
    provider
        .as_deref()
        .map(|name| format!(" ({name})"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_names_the_provider() {
        let err = ProviderError::new("quota exceeded").with_provider("openai");
        assert_eq!(err.to_string(), "Provider error (openai): quota exceeded");

        let anonymous = ProviderError::new("timeout");
        assert_eq!(anonymous.to_string(), "Provider error: timeout");
    }

    #[test]
    fn provider_error_passes_through_unchanged() {
        let err: ChunkerError = ProviderError::new("boom").with_provider("local").into();
        assert_eq!(err.to_string(), "Provider error (local): boom");
        assert!(matches!(err, ChunkerError::Provider(ref inner) if inner.message == "boom"));
    }

    #[test]
    fn provider_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "socket closed");
        let err = ProviderError::new("request failed").with_source(io);
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("socket closed"));
    }
}
