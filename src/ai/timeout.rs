//! Call Timeouts
//!
//! Every external call (crawl, search, LLM backend) runs under a deadline.
//! An elapsed deadline is reported as `IntelError::Timeout`, which callers
//! handle exactly like a failed call.
//!
//! ```ignore
//! use crate::ai::timeout::with_timeout;
//!
//! let raw = with_timeout(
//!     Duration::from_secs(60),
//!     backend.chat(&prompt),
//!     "analysis request",
//! ).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use crate::types::{IntelError, Result};

/// Execute an async operation with a timeout
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(IntelError::timeout(operation_name, timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(
            Duration::from_secs(1),
            async { Ok::<_, IntelError>(42) },
            "test operation",
        )
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_passes_inner_error() {
        let result: Result<u32> = with_timeout(
            Duration::from_secs(1),
            async { Err(IntelError::Search("offline".to_string())) },
            "search",
        )
        .await;
        assert!(matches!(result, Err(IntelError::Search(_))));
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, IntelError>(42)
            },
            "slow operation",
        )
        .await;
        assert!(matches!(result.unwrap_err(), IntelError::Timeout { .. }));
    }
}
