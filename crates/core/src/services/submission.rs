//! Cart submission boundary.
//!
//! The boundary wraps one remote cart mutation and owns its tri-state
//! lifecycle status. UI controls read the status to disable themselves
//! while a submission is in flight; they never set it. The status resets
//! to idle automatically when the remote call completes, success or
//! failure, and is never persisted.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::error::{CartError, CartResult};
use crate::metrics::record_cart_submission;
use crate::ports::{CartLinesAddInput, CartService};

/// Lifecycle status of one cart submission.
///
/// Driven entirely by the boundary: `Idle -> Submitting -> Loading ->
/// Idle` on success, `Idle -> Submitting -> Idle` on quick failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// No submission in flight.
    #[default]
    Idle,
    /// The mutation request is in flight.
    Submitting,
    /// The mutation answered; dependent data is refreshing.
    Loading,
}

impl SubmissionStatus {
    pub fn is_idle(self) -> bool {
        self == SubmissionStatus::Idle
    }
}

/// Compute the effective disabled state of a submission trigger.
///
/// An explicitly configured `disabled` wins; otherwise the trigger is
/// disabled whenever a submission is in flight (anything but idle).
pub fn effective_disabled(explicit: Option<bool>, status: SubmissionStatus) -> bool {
    explicit.unwrap_or(!status.is_idle())
}

/// Boundary around the remote lines-add mutation.
///
/// Each control instance gets its own boundary; status is not shared
/// across concurrent requests. The status is published through a watch
/// channel so interested parties can subscribe to transitions.
pub struct SubmissionBoundary {
    cart: Arc<dyn CartService>,
    status_tx: watch::Sender<SubmissionStatus>,
}

impl SubmissionBoundary {
    pub fn new(cart: Arc<dyn CartService>) -> Self {
        let (status_tx, _) = watch::channel(SubmissionStatus::Idle);
        Self { cart, status_tx }
    }

    /// Current submission status.
    pub fn status(&self) -> SubmissionStatus {
        *self.status_tx.borrow()
    }

    /// Subscribe to status transitions.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status_tx.subscribe()
    }

    /// Submit a lines-add mutation through the cart port.
    ///
    /// The boundary performs no local cart mutation, no optimistic
    /// update, and no error display: the mutation result is returned
    /// as-is for the collaborator to handle.
    #[instrument(skip_all, fields(lines = input.lines.len()))]
    pub async fn submit(&self, input: CartLinesAddInput) -> CartResult<String> {
        if input.lines.is_empty() {
            return Err(CartError::EmptyLines);
        }

        self.status_tx.send_replace(SubmissionStatus::Submitting);

        let result = self.cart.lines_add(input).await;

        match &result {
            Ok(cart_id) => {
                record_cart_submission("ok");
                debug!(cart_id = %cart_id, "Cart lines added");
                self.status_tx.send_replace(SubmissionStatus::Loading);
            }
            Err(e) => {
                record_cart_submission("error");
                warn!(error = %e, "Cart submission failed");
            }
        }

        self.status_tx.send_replace(SubmissionStatus::Idle);
        result
    }
}
