//! Loading the sample dataset into an empty scoreboard.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{FixtureRepository, FixtureRepositoryError};
use crate::domain::{FieldError, FixtureDataset, FixtureSummary};

/// Errors raised while preparing or applying the sample dataset.
#[derive(Debug, Error)]
pub enum SeedingError {
    /// The built-in dataset failed validation.
    #[error("fixture dataset is invalid: {0}")]
    InvalidDataset(#[from] FieldError),
    /// Persistence adapter refused or failed the write.
    #[error(transparent)]
    Persistence(#[from] FixtureRepositoryError),
}

/// Service behind the `populate-db` command.
#[derive(Clone)]
pub struct FixtureSeeder<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> FixtureSeeder<R> {
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl<R> FixtureSeeder<R>
where
    R: FixtureRepository,
{
    /// Insert the sample dataset, timestamping every score with "now".
    ///
    /// # Errors
    ///
    /// Returns [`SeedingError::Persistence`] wrapping
    /// [`FixtureRepositoryError::NotEmpty`] when players or games already
    /// exist, and [`FixtureRepositoryError::SchemaMissing`] before `init-db`.
    pub async fn seed(&self) -> Result<FixtureSummary, SeedingError> {
        let dataset = FixtureDataset::sample()?;
        let recorded_at = self.clock.utc().naive_utc();
        let summary = self.repository.populate(&dataset, recorded_at).await?;
        info!(
            players = summary.players,
            games = summary.games,
            levels = summary.levels,
            scores = summary.scores,
            "fixture data loaded"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockFixtureRepository;
    use crate::test_support::{InMemoryScoreboard, fixed_clock, fixture_timestamp};
    use mockable::MockClock;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn seeds_an_empty_store() {
        let store = Arc::new(InMemoryScoreboard::new());
        let seeder = FixtureSeeder::new(Arc::clone(&store), fixed_clock());

        let summary = seeder.seed().await.expect("seeded");
        assert_eq!(summary.scores, 27);
        assert_eq!(store.counts(), (3, 3, 9, 27));
    }

    #[rstest]
    #[tokio::test]
    async fn refuses_a_populated_store_without_writing() {
        let store = Arc::new(InMemoryScoreboard::seeded());
        let seeder = FixtureSeeder::new(Arc::clone(&store), fixed_clock());

        let err = seeder.seed().await.expect_err("not empty");
        assert!(matches!(
            err,
            SeedingError::Persistence(FixtureRepositoryError::NotEmpty)
        ));
        assert_eq!(store.counts(), (3, 3, 9, 27));
    }

    #[rstest]
    #[tokio::test]
    async fn passes_the_clock_time_to_the_repository() {
        let mut repo = MockFixtureRepository::new();
        repo.expect_populate()
            .withf(|_, recorded_at| *recorded_at == fixture_timestamp())
            .times(1)
            .returning(|dataset, _| Ok(dataset.summary()));
        let mut clock = MockClock::new();
        clock
            .expect_utc()
            .times(1)
            .return_const(crate::test_support::fixture_instant());
        let seeder = FixtureSeeder::new(Arc::new(repo), Arc::new(clock));

        seeder.seed().await.expect("seeded");
    }

    #[rstest]
    #[tokio::test]
    async fn surfaces_missing_schema() {
        let mut repo = MockFixtureRepository::new();
        repo.expect_populate()
            .return_once(|_, _| Err(FixtureRepositoryError::schema_missing()));
        let seeder = FixtureSeeder::new(Arc::new(repo), fixed_clock());

        let err = seeder.seed().await.expect_err("missing schema");
        assert!(err.to_string().contains("init-db"));
    }
}
