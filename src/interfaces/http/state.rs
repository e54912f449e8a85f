//! Shared handler state

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::application::{ListingService, ReservationService};
use crate::shared::{CallContext, CancelSignal};

use super::modules::health::HealthState;

/// State shared by every route. Handlers needing less extract a narrower
/// state through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub reservations: Arc<ReservationService>,
    pub listing: Arc<ListingService>,
    /// `None` when running on the in-memory backend
    pub db: Option<DatabaseConnection>,
    /// Hard abort for in-flight work. Fires once the shutdown grace period
    /// has run out, not when shutdown starts.
    pub abort: CancelSignal,
    pub request_timeout: Duration,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(
        reservations: Arc<ReservationService>,
        listing: Arc<ListingService>,
        abort: CancelSignal,
        request_timeout: Duration,
    ) -> Self {
        Self {
            reservations,
            listing,
            db: None,
            abort,
            request_timeout,
            started_at: Arc::new(Instant::now()),
        }
    }

    pub fn with_database(mut self, db: DatabaseConnection) -> Self {
        self.db = Some(db);
        self
    }

    /// Context for one request: aborted by the hard-abort signal or when the
    /// request timeout elapses.
    pub fn call_context(&self) -> CallContext {
        CallContext::background()
            .with_cancel(self.abort.clone())
            .with_timeout(self.request_timeout)
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}
