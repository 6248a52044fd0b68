// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Periodic refresh of the visible orders.
//!
//! The poller is one spawned task. It polls once on start and then once per
//! interval. Each poll fetches the orders the session should watch, compares
//! them with the previous snapshot and raises notifications for what
//! changed. Ticks never overlap: the next
//! tick is not awaited until the current fetch has finished, and ticks
//! missed while a fetch was slow are delayed rather than replayed.
//!
//! Any fetch failure ends the session and stops the poller.

use crate::client::BrewBoxClient;
use crate::error::ApiError;
use crate::notifications::{Notification, Notifier, dispatch};
use brewbox_core::{OrderEvent, diff_snapshots};
use brewbox_domain::{Order, RoleSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Default time between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(180);

/// Why the poller stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollerExit {
    /// `stop()` was called or the handle was dropped.
    Stopped,
    /// A fetch failed; the session has been cleared.
    SessionEnded(ApiError),
}

/// Builder and tick logic for the order poller.
pub struct OrderPoller {
    client: BrewBoxClient,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
}

impl OrderPoller {
    /// Creates a poller with the default interval.
    #[must_use]
    pub fn new(client: BrewBoxClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the time between polls. A zero interval is ignored.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        if interval.is_zero() {
            warn!("Ignoring zero poll interval");
        } else {
            self.interval = interval;
        }
        self
    }

    /// The time between polls.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs one poll against `previous` and returns the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no session or the fetch fails.
    pub async fn poll_once(&self, previous: &[Order]) -> Result<Vec<Order>, ApiError> {
        let roles: RoleSet = self.client.session()?.roles;
        let current: Vec<Order> = self.client.visible_orders().await?;
        let events: Vec<OrderEvent> = diff_snapshots(previous, &current, &roles);
        debug!(orders = current.len(), events = events.len(), "Poll complete");

        for event in events {
            dispatch(self.notifier.as_ref(), &Notification::from(event));
        }
        Ok(current)
    }

    /// Starts polling on the current tokio runtime.
    ///
    /// The first poll happens right away, then once per interval.
    #[must_use]
    pub fn spawn(self) -> PollerHandle {
        let (shutdown, receiver) = watch::channel(false);
        let task: JoinHandle<PollerExit> = tokio::spawn(self.run(receiver));
        PollerHandle {
            shutdown,
            task: Some(task),
        }
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) -> PollerExit {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut snapshot: Vec<Order> = Vec::new();
        info!(interval_secs = self.interval.as_secs(), "Order poller started");

        loop {
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Order poller stopped");
                        return PollerExit::Stopped;
                    }
                }
                _ = ticker.tick() => {
                    match self.poll_once(&snapshot).await {
                        Ok(current) => snapshot = current,
                        Err(e) => {
                            warn!(error = %e, "Poll failed; ending session");
                            self.client.end_session();
                            dispatch(
                                self.notifier.as_ref(),
                                &Notification::SessionEnded { reason: e.to_string() },
                            );
                            return PollerExit::SessionEnded(e);
                        }
                    }
                }
            }
        }
    }
}

/// Handle to a running poller. Dropping it stops the poller.
#[derive(Debug)]
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<PollerExit>>,
}

impl PollerHandle {
    /// Asks the poller to stop. A fetch already in flight completes first.
    pub fn stop(&self) {
        self.shutdown.send_replace(true);
    }

    /// Returns true once the poller task has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits for the poller to finish.
    pub async fn join(mut self) -> PollerExit {
        let Some(task) = self.task.take() else {
            return PollerExit::Stopped;
        };
        match task.await {
            Ok(exit) => exit,
            Err(e) => {
                warn!(error = %e, "Order poller task failed");
                PollerExit::Stopped
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
    }
}
