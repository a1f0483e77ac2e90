use std::future::Future;
use std::time::Duration;

use pritunl_core::{Error, Result};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation and deadline for one call.
///
/// A scope is passed to every client call instead of being stored on the
/// client, so a cancelled scope can never leak into unrelated calls. The
/// default scope never cancels and has no deadline.
///
/// ```
/// use std::time::Duration;
/// use pritunl::CallScope;
/// use tokio_util::sync::CancellationToken;
///
/// let token = CancellationToken::new();
/// let scope = CallScope::new()
///     .with_timeout(Duration::from_secs(10))
///     .with_cancellation(token.clone());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallScope {
    cancel: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl CallScope {
    /// Create a scope that never cancels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort calls once `timeout` has elapsed from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Abort calls once `deadline` is reached.
    ///
    /// The earliest deadline wins when called more than once.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Abort calls when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Deadline of this scope, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Check whether the scope is already cancelled or expired.
    pub fn check(&self) -> Result<()> {
        if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
            return Err(Error::cancelled("call cancelled"));
        }
        if self.deadline.is_some_and(|d| d <= Instant::now()) {
            return Err(Error::timeout("call deadline exceeded"));
        }
        Ok(())
    }

    /// Drive `fut` until it completes, the token fires or the deadline passes.
    ///
    /// When the scope fires first `fut` is dropped, which aborts the
    /// in-flight request.
    pub async fn run<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        self.check()?;

        let cancelled = async {
            match &self.cancel {
                Some(token) => token.cancelled().await,
                None => std::future::pending().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            res = fut => res,
            _ = cancelled => Err(Error::cancelled("call cancelled")),
            _ = expired => Err(Error::timeout("call deadline exceeded")),
        }
    }
}
