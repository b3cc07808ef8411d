//! bb8 pool of `diesel-async` PostgreSQL connections.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// How long a handler waits for a free connection before answering 503.
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors raised while building the pool or checking out a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("no database connection available: {message}")]
    Checkout { message: String },
    #[error("cannot configure the connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Human readable cause, without the variant prefix.
    pub fn into_message(self) -> String {
        match self {
            Self::Checkout { message } | Self::Build { message } => message,
        }
    }
}

/// Connection string and size of the pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    url: String,
    max_size: u32,
}

impl PoolConfig {
    /// Pool for `url` holding at most ten connections.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_size: 10,
        }
    }

    #[must_use]
    pub fn with_max_size(self, max_size: u32) -> Self {
        Self {
            max_size: max_size.max(1),
            ..self
        }
    }
}

/// Cloneable handle to the shared pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool. Connections open lazily, so an unreachable database
    /// only surfaces at checkout.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when bb8 rejects the configuration.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let PoolConfig { url, max_size } = config;
        Pool::builder()
            .max_size(max_size)
            .connection_timeout(CHECKOUT_TIMEOUT)
            .build(AsyncDieselConnectionManager::<AsyncPgConnection>::new(url))
            .await
            .map(|inner| Self { inner })
            .map_err(|err| PoolError::build(err.to_string()))
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when none frees up in time.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_to_ten_connections() {
        let config = PoolConfig::new("postgres://localhost/scores");
        assert_eq!(config.max_size, 10);
        assert_eq!(config.url, "postgres://localhost/scores");
    }

    #[rstest]
    #[case::configured(3, 3)]
    #[case::zero_is_raised(0, 1)]
    fn pool_size_follows_configuration(#[case] requested: u32, #[case] expected: u32) {
        let config = PoolConfig::new("postgres://localhost/scores").with_max_size(requested);
        assert_eq!(config.max_size, expected);
    }

    #[rstest]
    #[case(PoolError::checkout("refused"))]
    #[case(PoolError::build("bad url"))]
    fn messages_survive_unwrapping(#[case] error: PoolError) {
        let rendered = error.to_string();
        let message = error.into_message();
        assert!(rendered.ends_with(&message));
    }
}
