//! Classification of Diesel failures shared by every repository.
//!
//! Each adapter turns a [`DbFailure`] into its own port error, so unique and
//! foreign-key violations surface as typed conflicts rather than opaque
//! query errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// PostgreSQL SQLSTATE 42P01 message fragment for a missing relation.
const UNDEFINED_TABLE_FRAGMENT: &str = "does not exist";

/// Storage-agnostic outcome of a failed Diesel call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DbFailure {
    /// The connection dropped or could not be used.
    Connection(String),
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation { constraint: Option<String> },
    /// A referenced table is missing; migrations have not run.
    UndefinedTable(String),
    /// Anything else.
    Query(String),
}

impl DbFailure {
    /// Message suitable for a port error.
    pub(crate) fn into_message(self) -> String {
        match self {
            Self::Connection(message) | Self::UndefinedTable(message) | Self::Query(message) => {
                message
            }
            Self::UniqueViolation { constraint } | Self::ForeignKeyViolation { constraint } => {
                format!(
                    "constraint {} violated",
                    constraint.as_deref().unwrap_or("<unnamed>")
                )
            }
        }
    }
}

/// Classify a Diesel error, logging the raw details at debug level.
pub(crate) fn classify(error: DieselError) -> DbFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                table = info.table_name(),
                "diesel operation failed"
            );
            let constraint = info.constraint_name().map(str::to_owned);
            match kind {
                DatabaseErrorKind::UniqueViolation => DbFailure::UniqueViolation { constraint },
                DatabaseErrorKind::ForeignKeyViolation => {
                    DbFailure::ForeignKeyViolation { constraint }
                }
                DatabaseErrorKind::ClosedConnection
                | DatabaseErrorKind::UnableToSendCommand => {
                    DbFailure::Connection(info.message().to_owned())
                }
                _ if info.message().contains(UNDEFINED_TABLE_FRAGMENT)
                    && info.message().starts_with("relation") =>
                {
                    DbFailure::UndefinedTable(info.message().to_owned())
                }
                _ => DbFailure::Query(info.message().to_owned()),
            }
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            DbFailure::Query(other.to_string())
        }
    }
}
