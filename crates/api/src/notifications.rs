// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local notifications raised by the order poller.
//!
//! Delivery is best effort: a notifier that fails is logged and skipped,
//! and never stops the poller.

use brewbox_core::OrderEvent;
use brewbox_domain::{OrderId, OrderStatus};
use thiserror::Error;
use tracing::{info, warn};

/// Something worth telling the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A placed order appeared in the barista queue.
    NewUnclaimedOrder {
        /// The new order.
        order_id: OrderId,
        /// Its requested pickup time.
        pickup_time: String,
    },
    /// An order changed status.
    StatusChanged {
        /// The order.
        order_id: OrderId,
        /// Previous status.
        from: OrderStatus,
        /// New status.
        to: OrderStatus,
    },
    /// Polling stopped because the session is no longer valid.
    SessionEnded {
        /// Why the session ended.
        reason: String,
    },
}

impl From<OrderEvent> for Notification {
    fn from(event: OrderEvent) -> Self {
        match event {
            OrderEvent::NewUnclaimedOrder {
                order_id,
                pickup_time,
            } => Self::NewUnclaimedOrder {
                order_id,
                pickup_time,
            },
            OrderEvent::StatusChanged { order_id, from, to } => {
                Self::StatusChanged { order_id, from, to }
            }
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NewUnclaimedOrder {
                order_id,
                pickup_time,
            } => write!(f, "New order {order_id} waiting to be claimed (pickup {pickup_time})"),
            Self::StatusChanged { order_id, from, to } => {
                write!(f, "Order {order_id} is now {to} (was {from})")
            }
            Self::SessionEnded { reason } => {
                write!(f, "Stopped watching orders: {reason}. Please log in again.")
            }
        }
    }
}

/// Failure to deliver a notification.
#[derive(Debug, Error)]
#[error("Notification could not be delivered: {0}")]
pub struct NotifyError(pub String);

/// A sink for notifications.
pub trait Notifier: Send + Sync {
    /// Delivers one notification. Must not block for long.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be delivered.
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Notifier that writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(%notification, "Notification");
        Ok(())
    }
}

/// Delivers `notification`, logging and ignoring any failure.
pub fn dispatch(notifier: &dyn Notifier, notification: &Notification) {
    if let Err(e) = notifier.notify(notification) {
        warn!(error = %e, %notification, "Dropped notification");
    }
}
