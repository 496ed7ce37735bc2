//! Cancellation context: cooperative cancellation and deadlines for parallel runs.
//!
//! Wraps a `tokio::sync::watch` channel carrying the cancel reason, plus an
//! optional deadline. The runner polls it at its wait points; running tasks are
//! never interrupted.

use std::fmt;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::CancelReason;

/// A caller-supplied cancellation signal with an optional deadline.
///
/// Clone-friendly: all clones share the same signal, so any clone can cancel
/// a run that was handed another.
#[derive(Clone)]
pub struct CancellationContext {
    tx: watch::Sender<Option<CancelReason>>,
    rx: watch::Receiver<Option<CancelReason>>,
    deadline: Option<Instant>,
}

impl CancellationContext {
    /// Create a context that only fires when [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(None);
        Self {
            tx,
            rx,
            deadline: None,
        }
    }

    /// Create a context that fires with [`CancelReason::DeadlineExceeded`] at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..Self::new()
        }
    }

    /// Create a context that fires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// The deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Signal cancellation. Idempotent; the first reason recorded wins.
    pub fn cancel(&self) {
        self.tx.send_if_modified(|reason| {
            if reason.is_none() {
                *reason = Some(CancelReason::Cancelled);
                true
            } else {
                false
            }
        });
    }

    /// Why the context has fired, or `None` while it is still live.
    pub fn err(&self) -> Option<CancelReason> {
        if let Some(reason) = *self.rx.borrow() {
            return Some(reason);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// Check if the context has fired.
    pub fn is_cancelled(&self) -> bool {
        self.err().is_some()
    }

    /// Wait until the context fires and return why.
    ///
    /// Returns immediately if it already has. An explicit cancel takes
    /// priority over a deadline that expires at the same moment.
    ///
    /// With a deadline set, this must be polled on a runtime whose time
    /// driver is enabled.
    pub async fn cancelled(&self) -> CancelReason {
        let mut rx = self.rx.clone();
        // `self` owns the sender, so the channel stays open while this waits.
        let signalled = async move {
            match rx.wait_for(Option::is_some).await {
                Ok(reason) => (*reason).unwrap_or(CancelReason::Cancelled),
                Err(_) => CancelReason::Cancelled,
            }
        };

        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                reason = signalled => reason,
                _ = tokio::time::sleep_until(deadline) => CancelReason::DeadlineExceeded,
            },
            None => signalled.await,
        }
    }
}

impl Default for CancellationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancellationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationContext")
            .field("reason", &*self.rx.borrow())
            .field("deadline", &self.deadline)
            .finish()
    }
}
