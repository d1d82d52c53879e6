//! Request deadlines for service calls.

use std::future::Future;
use std::time::Duration;

use serde_json::json;

use crate::error::AppError;

/// Runs `fut` with a time limit.
///
/// On expiry the future is dropped, which releases its pooled connection and
/// rolls back any open transaction.
///
/// # Errors
///
/// Returns [`AppError::Timeout`] if `limit` elapses first, otherwise whatever
/// `fut` returns.
pub async fn with_deadline<T, F>(limit: Duration, operation: &str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, limit_ms = limit.as_millis() as u64, "Deadline exceeded");
            Err(AppError::timeout(
                "Operation timed out",
                json!({ "operation": operation }),
            ))
        }
    }
}
