use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Sleep for `delay` unless `cancel` fires first.
///
/// Returns `false` when the token was cancelled before or during the pause.
pub(crate) async fn pause(delay: Duration, cancel: &CancellationToken) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    if delay.is_zero() {
        return true;
    }

    tracing::debug!(delay_ms = delay.as_millis(), "pacing before next request");
    tokio::select! {
        () = cancel.cancelled() => false,
        () = tokio::time::sleep(delay) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn pause_sleeps_for_full_delay() {
        let token = CancellationToken::new();
        let start = tokio::time::Instant::now();
        assert!(pause(Duration::from_millis(250), &token).await);
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_returns_immediately_when_already_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let start = tokio::time::Instant::now();
        assert!(!pause(Duration::from_secs(10), &token).await);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_cuts_pause_short() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let start = tokio::time::Instant::now();
        assert!(!pause(Duration::from_secs(60), &token).await);
        assert!(start.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test]
    async fn zero_delay_does_not_sleep() {
        let token = CancellationToken::new();
        assert!(pause(Duration::ZERO, &token).await);
    }
}
