/// Failure of a single feed fetch.
///
/// Network errors, non-success statuses, bodies that are not JSON and JSON of
/// the wrong shape all collapse into this one type. The message says which
/// step failed; callers are expected to log it and move on.
#[derive(Debug)]
pub struct FetchError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {source}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FetchError;
    use std::error::Error;

    #[test]
    fn display_includes_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = FetchError::with_source("feed request failed", io);
        assert_eq!(err.to_string(), "feed request failed: refused");
        assert!(err.source().is_some());
    }

    #[test]
    fn display_without_source() {
        let err = FetchError::new("feed returned HTTP 503");
        assert_eq!(err.to_string(), "feed returned HTTP 503");
        assert!(err.source().is_none());
    }
}
