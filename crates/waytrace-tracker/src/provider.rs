//! Current-position acquisition.

use std::time::Duration;

use async_trait::async_trait;

use waytrace_core::{Coordinate, SampleError};

/// Yields a single current-position fix on demand.
///
/// One request, one fix. No retry policy here: the tracker's schedule
/// decides when to ask again.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, SampleError>;
}

/// Run one sample request, failing with [`SampleError::TimedOut`] if the
/// provider does not resolve within `timeout`.
pub async fn sample_with_timeout(
    provider: &dyn LocationProvider,
    timeout: Duration,
) -> Result<Coordinate, SampleError> {
    match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(result) => result,
        Err(_) => Err(SampleError::TimedOut(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverResolves;

    #[async_trait]
    impl LocationProvider for NeverResolves {
        async fn current_position(&self) -> Result<Coordinate, SampleError> {
            std::future::pending().await
        }
    }

    struct Immediate(Coordinate);

    #[async_trait]
    impl LocationProvider for Immediate {
        async fn current_position(&self) -> Result<Coordinate, SampleError> {
            Ok(self.0)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn unresolved_request_times_out() {
        let result = sample_with_timeout(&NeverResolves, Duration::from_secs(10)).await;
        assert!(matches!(
            result,
            Err(SampleError::TimedOut(t)) if t == Duration::from_secs(10)
        ));
    }

    #[tokio::test]
    async fn resolved_request_passes_through() {
        let point = Coordinate::new(10.0, 20.0).unwrap();
        let result = sample_with_timeout(&Immediate(point), Duration::from_secs(10)).await;
        assert_eq!(result.unwrap(), point);
    }
}
