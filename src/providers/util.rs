use anyhow::{Error, anyhow};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Sends a request, retrying on transport errors and server errors.
///
/// # Parameters
/// - `operation`: Closure returning the request future
/// - `retries`: Number of retry attempts (total runs = 1 initial + retries)
/// - `delay_ms`: Milliseconds between retry attempts
///
/// # Returns
/// The first response that is not a server error, or the last failure.
/// Client errors (4xx) are returned as responses without retrying.
pub async fn with_retry<F, Fut>(
    mut operation: F,
    retries: usize,
    delay_ms: u64,
) -> Result<reqwest::Response, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 1;
    loop {
        let err = match operation().await {
            Ok(response) if !response.status().is_server_error() => return Ok(response),
            Ok(response) => anyhow!("Server error: {}", response.status()),
            Err(e) => Error::from(e),
        };
        if attempt > retries {
            return Err(err);
        }
        debug!("Attempt {} failed: {}. Retrying...", attempt_label(attempt, retries), err);
        attempt += 1;
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

/// `attempt/total`, where the total counts the initial run.
fn attempt_label(attempt: usize, retries: usize) -> String {
    format!("{}/{}", attempt, retries + 1)
}
