//! Attempt-or-fallback wrappers shared by the recovering pipeline stages

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Pipeline stages, in the only order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Transcribing,
    Detecting,
    Generating,
}

impl Stage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transcribing => "transcribing",
            Self::Detecting => "detecting",
            Self::Generating => "generating",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a stage fell back
#[derive(Debug, Error)]
pub enum StageFault<E> {
    #[error("{0}")]
    Failed(E),

    #[error("timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}

/// Run `call` under `limit`; on error or timeout, log and return `fallback`.
pub async fn attempt_or_fallback<T, E, F>(stage: Stage, limit: Duration, fallback: T, call: F) -> T
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    match attempt(limit, call).await {
        Ok(value) => value,
        Err(fault) => {
            tracing::warn!(stage = %stage, error = %fault, "Stage failed, using fallback");
            fallback
        }
    }
}

/// Run `call` under `limit`, folding the timeout into the error.
pub async fn attempt<T, E, F>(limit: Duration, call: F) -> Result<T, StageFault<E>>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(StageFault::Failed(e)),
        Err(_) => Err(StageFault::TimedOut(limit)),
    }
}

/// Synchronous counterpart for local parse steps.
pub fn recover_or<T, E: fmt::Display>(stage: Stage, result: Result<T, E>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(stage = %stage, error = %e, "Could not parse stage output, using fallback");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_success() {
        let value = attempt_or_fallback(
            Stage::Detecting,
            Duration::from_secs(1),
            "fallback",
            async { Ok::<_, String>("detected") },
        )
        .await;
        assert_eq!(value, "detected");
    }

    #[tokio::test]
    async fn error_yields_fallback() {
        let value = attempt_or_fallback(
            Stage::Transcribing,
            Duration::from_secs(1),
            String::new(),
            async { Err::<String, _>("backend down") },
        )
        .await;
        assert_eq!(value, "");
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_yields_fallback() {
        let value = attempt_or_fallback(Stage::Detecting, Duration::from_secs(5), 0u8, async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, String>(1u8)
        })
        .await;
        assert_eq!(value, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn attempt_reports_timeout() {
        let fault = attempt(Duration::from_secs(2), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<(), String>(())
        })
        .await
        .unwrap_err();
        assert!(matches!(fault, StageFault::TimedOut(d) if d.as_secs() == 2));
        assert_eq!(fault.to_string(), "timed out after 2s");
    }

    #[test]
    fn failed_fault_is_an_error_showing_the_backend_message() {
        let fault = StageFault::Failed(std::io::Error::other("backend down"));
        assert_eq!(fault.to_string(), "backend down");
        let err: &dyn std::error::Error = &fault;
        assert!(err.source().is_none());
    }

    #[test]
    fn recover_or_uses_fallback_on_error() {
        assert_eq!(recover_or(Stage::Generating, Err::<u8, _>("bad json"), 7), 7);
        assert_eq!(recover_or(Stage::Generating, Ok::<u8, String>(3), 7), 3);
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::Transcribing.to_string(), "transcribing");
        assert_eq!(Stage::Generating.as_str(), "generating");
    }
}
