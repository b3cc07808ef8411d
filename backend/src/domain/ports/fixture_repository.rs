//! Port for bulk-loading the sample dataset.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::{FixtureDataset, FixtureSummary};

use super::define_port_error;

define_port_error! {
    /// Errors raised while loading fixtures.
    pub enum FixtureRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "fixture repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "fixture repository query failed: {message}",
        /// Players or games already exist; nothing was written.
        NotEmpty => "database must be empty before it can be populated",
        /// The tables do not exist yet.
        SchemaMissing => "database schema is missing; run init-db first",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FixtureRepository: Send + Sync {
    /// Insert `dataset` in a single transaction, stamping every score with
    /// `recorded_at`.
    async fn populate(
        &self,
        dataset: &FixtureDataset,
        recorded_at: NaiveDateTime,
    ) -> Result<FixtureSummary, FixtureRepositoryError>;
}
