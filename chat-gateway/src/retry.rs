//! Bounded retry with exponential backoff for provider calls.
//!
//! Only errors classified transient by [`LlmError::is_transient`] are
//! retried; auth failures, rate limits, and malformed requests propagate on
//! the first attempt. Attempts are strictly sequential — no concurrent
//! duplicate requests — with a doubling delay between them.

use std::future::Future;
use std::time::Duration;

use llm_service::LlmError;
use tracing::warn;

/// Run `op` up to `max_attempts` times, sleeping `initial_delay * 2^n`
/// between transient failures.
///
/// # Errors
/// The first non-transient error, or the last transient error once the
/// attempt budget is spent.
pub async fn retry_with_backoff<T, F, Fut>(
    max_attempts: u32,
    initial_delay: Duration,
    mut op: F,
) -> Result<T, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut delay = initial_delay;
    let mut attempt = 1u32;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < max_attempts => {
                warn!(
                    target: "chat_gateway::retry",
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "transient provider failure, retrying"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
