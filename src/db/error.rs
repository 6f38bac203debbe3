//! Database error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Which part of the persistence layer failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DbErrorKind {
    /// Opening the SQLite file failed.
    #[display("connection")]
    Connection,
    /// Applying embedded migrations failed.
    #[display("migration")]
    Migration,
    /// A query or statement failed.
    #[display("query")]
    Query,
    /// A stored row does not describe a valid session.
    #[display("corrupt row")]
    CorruptRow,
}

/// Database error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Database {} error: {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// What failed.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new database error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Error for a row that cannot be turned back into a session.
    #[track_caller]
    pub fn corrupt_row(id: i32, detail: impl std::fmt::Display) -> Self {
        Self::new(DbErrorKind::CorruptRow, format!("game {}: {}", id, detail))
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, err.to_string())
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(DbErrorKind::Connection, err.to_string())
    }
}
