use thiserror::Error;

/// Errors that can occur while connecting to or querying the event store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Missing configuration: {0}")]
    Configuration(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Event",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Event already exists: abc-123");
    }

    #[test]
    fn test_repository_error_configuration_display() {
        let error = RepositoryError::Configuration("MONGODB_URI is not set".to_string());
        assert_eq!(
            error.to_string(),
            "Missing configuration: MONGODB_URI is not set"
        );
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("server selection timeout".to_string());
        assert_eq!(
            error.to_string(),
            "Connection failed: server selection timeout"
        );
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("cursor killed".to_string());
        assert_eq!(error.to_string(), "Query failed: cursor killed");
    }

    #[test]
    fn test_repository_error_serialization_display() {
        let error = RepositoryError::Serialization("missing field `image`".to_string());
        assert_eq!(
            error.to_string(),
            "Serialization error: missing field `image`"
        );
    }
}
