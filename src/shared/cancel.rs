//! Cancellation and deadlines
//!
//! `CancelSignal` is a cloneable trigger shared between whoever wants work
//! to stop and the work itself. The server uses one as its shutdown signal;
//! callers of the reservation core use one per request through `CallContext`,
//! which races every persistence call against the signal and an optional
//! deadline.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, info};

use super::types::{DomainError, DomainResult};

/// Cancellation signal that can be cloned and shared across tasks
#[derive(Clone)]
pub struct CancelSignal {
    sender: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl CancelSignal {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self {
            sender,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    pub fn trigger(&self) {
        if !self.triggered.swap(true, Ordering::SeqCst) {
            let _ = self.sender.send(());
        }
    }

    /// Resolves once [`trigger`](Self::trigger) has been called, immediately if it already was.
    pub async fn cancelled(&self) {
        let mut rx = self.sender.subscribe();
        if self.is_triggered() {
            return;
        }
        let _ = rx.recv().await;
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Caller-supplied scope for one core operation.
#[derive(Clone, Default)]
pub struct CallContext {
    cancel: Option<CancelSignal>,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail fast if the context is already done.
    pub fn check(&self, operation: &str) -> DomainResult<()> {
        if self.cancel.as_ref().is_some_and(CancelSignal::is_triggered) {
            return Err(DomainError::Cancelled(format!("{operation} cancelled by caller")));
        }
        if self.deadline.is_some_and(|at| Instant::now() >= at) {
            return Err(DomainError::Cancelled(format!("{operation} exceeded its deadline")));
        }
        Ok(())
    }

    /// Run `fut` unless the context is cancelled or its deadline passes first.
    ///
    /// On cancellation the future is dropped, which aborts the outstanding
    /// persistence call.
    pub async fn run<T, F>(&self, operation: &str, fut: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        self.check(operation)?;

        let cancelled = async {
            match &self.cancel {
                Some(signal) => signal.cancelled().await,
                None => std::future::pending().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => {
                debug!(operation, "Operation cancelled by caller");
                Err(DomainError::Cancelled(format!("{operation} cancelled by caller")))
            }
            _ = expired => {
                debug!(operation, "Operation exceeded its deadline");
                Err(DomainError::Cancelled(format!("{operation} exceeded its deadline")))
            }
            result = fut => result,
        }
    }
}

/// Trigger `abort` once `grace` has passed after `shutdown` fired.
///
/// Requests run under `abort` rather than the shutdown signal itself, so
/// work in flight at shutdown gets `grace` to finish.
pub async fn abort_after_grace(shutdown: CancelSignal, abort: CancelSignal, grace: Duration) {
    shutdown.cancelled().await;
    tokio::time::sleep(grace).await;
    if !abort.is_triggered() {
        info!(grace_secs = grace.as_secs(), "Grace period over, aborting in-flight work");
    }
    abort.trigger();
}

/// Listen for OS shutdown signals (SIGTERM, SIGINT) and trigger `shutdown`
pub async fn listen_for_shutdown_signals(shutdown: CancelSignal) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let (Ok(mut sigterm), Ok(mut sigint)) = (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) else {
            tracing::warn!("Failed to install signal handlers, shutdown only via trigger");
            return;
        };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("📡 Received SIGTERM signal");
            }
            _ = sigint.recv() => {
                info!("📡 Received SIGINT signal (Ctrl+C)");
            }
        }

        shutdown.trigger();
    }

    #[cfg(not(unix))]
    {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("📡 Received Ctrl+C signal");
        }
        shutdown.trigger();
    }
}
