//! Error types for the tallybook core.

/// Convenience alias for results produced by this crate.
pub type Result<T> = core::result::Result<T, TallybookError>;

/// All errors that can occur in the tallybook core.
///
/// The in-memory stores themselves are total over their inputs; errors only
/// arise at the persistence and collaborator boundaries.
#[derive(Debug, thiserror::Error)]
pub enum TallybookError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Preference storage backend failed.
    #[error("preference storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),

    /// The network service collaborator reported a failure.
    #[error("finance service error: {0}")]
    Service(String),
}

/// Wraps an I/O error into the storage variant.
#[cfg(feature = "storage-file")]
pub(crate) fn storage_io_error(err: std::io::Error) -> TallybookError {
    TallybookError::Storage(Box::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_serde_json() {
        let serde_err = serde_json::from_str::<String>("not json").unwrap_err();
        let err = TallybookError::from(serde_err);
        assert!(matches!(err, TallybookError::Serialization(_)));
        let msg = err.to_string();
        assert!(msg.contains("serialization error"));
    }

    #[test]
    fn error_storage_display() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = TallybookError::Storage(Box::new(inner));
        let msg = err.to_string();
        assert!(msg.contains("preference storage error"));
        assert!(msg.contains("file missing"));
    }

    #[test]
    fn error_service_display() {
        let err = TallybookError::Service("stats endpoint unavailable".to_owned());
        assert!(err.to_string().contains("stats endpoint unavailable"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TallybookError>();
    }
}
