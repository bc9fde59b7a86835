// Cancellation Context
//
// Every repository operation receives a Context. A cancelled or expired
// context makes the operation fail at the next await point instead of blocking.

use crate::error::{AppError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation scope with an optional deadline
///
/// Cheap to clone. Children observe their parent's cancellation and never
/// outlive its deadline; cancelling a child leaves the parent untouched.
#[derive(Clone, Debug)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

/// Cancels the context it was created with (and all of that context's children)
#[derive(Clone, Debug)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl Context {
    /// Root context: never cancelled, no deadline
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Root context expiring after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().child_with_timeout(timeout)
    }

    /// Root context cancelled through the returned handle
    pub fn with_cancel() -> (Self, CancelHandle) {
        Self::background().child_with_cancel()
    }

    pub fn child_with_cancel(&self) -> (Self, CancelHandle) {
        let token = self.token.child_token();
        let ctx = Self {
            token: token.clone(),
            deadline: self.deadline,
        };
        (ctx, CancelHandle { token })
    }

    /// Child expiring after `timeout`, or at the parent's deadline if that comes first
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        let deadline = match self.deadline {
            Some(parent) if parent < candidate => parent,
            _ => candidate,
        };
        Self {
            token: self.token.child_token(),
            deadline: Some(deadline),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Why the context is finished, or None while it is still live
    pub fn err(&self) -> Option<AppError> {
        if self.token.is_cancelled() {
            return Some(AppError::Cancelled);
        }
        match self.deadline {
            Some(at) if Instant::now() >= at => Some(AppError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Fail fast if the context is already finished
    pub fn check(&self) -> Result<()> {
        match self.err() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Resolve once the context is cancelled or its deadline passes
    pub async fn done(&self) -> AppError {
        if let Some(err) = self.err() {
            return err;
        }
        match self.deadline {
            Some(at) => tokio::select! {
                _ = self.token.cancelled() => AppError::Cancelled,
                _ = tokio::time::sleep_until(at) => AppError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                AppError::Cancelled
            }
        }
    }

    /// Race `fut` against the context; the future is dropped if the context finishes first
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            res = fut => res,
        }
    }
}
