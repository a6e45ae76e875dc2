//! MongoDB error mapping.
//!
//! Maps `mongodb::error::Error` to `RepositoryError` from `evently_core::storage`.

use mongodb::error::{Error, ErrorKind, WriteFailure};

use evently_core::storage::RepositoryError;

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// Maps a driver error raised while talking to an established connection.
///
/// # Error Mapping
///
/// - Duplicate key (11000) → `RepositoryError::AlreadyExists`
/// - Server selection, DNS, I/O and pool errors → `RepositoryError::ConnectionFailed`
/// - BSON (de)serialization errors → `RepositoryError::Serialization`
/// - All other errors → `RepositoryError::QueryFailed`
pub fn map_mongo_error(err: Error, entity_type: &'static str, id: impl Into<String>) -> RepositoryError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY =>
        {
            RepositoryError::AlreadyExists {
                entity_type,
                id: id.into(),
            }
        }
        ErrorKind::ServerSelection { .. }
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => {
            RepositoryError::ConnectionFailed(err.to_string())
        }
        ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
            RepositoryError::Serialization(err.to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps any error raised while establishing the connection.
pub fn map_connection_error(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::ConnectionFailed(err.to_string())
}
