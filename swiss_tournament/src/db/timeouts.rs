//! Query timeouts.
//!
//! Every statement the store issues goes through [`with_timeout`] so a stuck
//! connection surfaces as an error instead of hanging the caller.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

/// Default timeout for a single query (5 seconds)
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for opening or committing a transaction (10 seconds)
pub const DEFAULT_TRANSACTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for timeout operations
#[derive(Debug, thiserror::Error)]
pub enum TimeoutError {
    /// Operation timed out
    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for timeout operations
pub type TimeoutResult<T> = Result<T, TimeoutError>;

/// Run a database future, failing with [`TimeoutError::Timeout`] after `duration`
///
/// # Example
///
/// ```no_run
/// use swiss_tournament::db::timeouts::{with_timeout, DEFAULT_QUERY_TIMEOUT};
/// # use sqlx::PgPool;
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
///
/// let rows = with_timeout(
///     DEFAULT_QUERY_TIMEOUT,
///     sqlx::query("SELECT id FROM players WHERE id_tournament = $1")
///         .bind(1_i64)
///         .fetch_all(pool),
/// )
/// .await?;
///
/// # Ok(())
/// # }
/// ```
pub async fn with_timeout<F, T>(duration: Duration, future: F) -> TimeoutResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match timeout(duration, future).await {
        Ok(result) => result.map_err(TimeoutError::Database),
        Err(_) => Err(TimeoutError::Timeout(duration)),
    }
}

/// Run a single query with [`DEFAULT_QUERY_TIMEOUT`]
pub async fn with_default_timeout<F, T>(future: F) -> TimeoutResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    with_timeout(DEFAULT_QUERY_TIMEOUT, future).await
}

/// Begin or commit a transaction with [`DEFAULT_TRANSACTION_TIMEOUT`]
pub async fn with_transaction_timeout<F, T>(future: F) -> TimeoutResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    with_timeout(DEFAULT_TRANSACTION_TIMEOUT, future).await
}
