//! Blocking bridge over the store's callback API
//!
//! Each call hands the store a single-shot completion backed by a
//! `tokio::sync::oneshot` channel and blocks on a private current-thread
//! runtime until the value arrives or the timeout elapses. A timeout stops
//! only the waiting: the store request stays in flight and whatever it
//! delivers later goes into a closed channel.
//!
//! Must not be called from inside an async context.

use crate::config::{RemindKitConfig, TimeoutPolicy};
use crate::error::{ReminderError, ReminderResult};
use crate::store::{NativeReminder, Predicate, ReminderStore, StoreError};
use log::{debug, warn};
use std::time::{Duration, Instant};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::oneshot;

pub struct FetchBridge {
    runtime: Runtime,
    fetch_timeout: Duration,
    access_timeout: Duration,
    policy: TimeoutPolicy,
}

impl std::fmt::Debug for FetchBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchBridge")
            .field("fetch_timeout", &self.fetch_timeout)
            .field("access_timeout", &self.access_timeout)
            .field("policy", &self.policy)
            .finish()
    }
}

impl FetchBridge {
    pub fn new(config: &RemindKitConfig) -> ReminderResult<Self> {
        Self::with_timeouts(
            config.fetch_timeout(),
            config.access_timeout(),
            config.timeout_policy,
        )
    }

    pub fn with_timeouts(
        fetch_timeout: Duration,
        access_timeout: Duration,
        policy: TimeoutPolicy,
    ) -> ReminderResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| ReminderError::config(format!("Failed to start bridge runtime: {}", e)))?;

        Ok(Self {
            runtime,
            fetch_timeout,
            access_timeout,
            policy,
        })
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    pub fn policy(&self) -> TimeoutPolicy {
        self.policy
    }

    /// Asks the store for access and waits for the answer. Anything short of
    /// an explicit grant, including no answer at all, is a denial.
    pub fn request_access(&self, store: &dyn ReminderStore) -> ReminderResult<()> {
        let (tx, rx) = oneshot::channel();
        store.request_access(Box::new(move |result| {
            let _ = tx.send(result);
        }));

        match self.wait(rx, self.access_timeout) {
            Some(Ok(Ok(true))) => Ok(()),
            Some(Ok(Ok(false))) => Err(ReminderError::permission_denied("No access to reminders")),
            Some(Ok(Err(e))) => Err(ReminderError::permission_denied(format!(
                "Access request failed: {}",
                e
            ))),
            Some(Err(_)) => Err(ReminderError::permission_denied(
                "Access request was dropped without an answer",
            )),
            None => Err(ReminderError::permission_denied(format!(
                "No answer to access request after {:?}",
                self.access_timeout
            ))),
        }
    }

    /// Runs one fetch and blocks until it completes or times out.
    pub fn fetch(
        &self,
        store: &dyn ReminderStore,
        predicate: &Predicate,
    ) -> ReminderResult<Vec<NativeReminder>> {
        let started = Instant::now();
        let (tx, rx) = oneshot::channel();
        store.fetch(
            predicate,
            Box::new(move |result| {
                // receiver is gone once the waiter timed out
                let _ = tx.send(result);
            }),
        );

        match self.wait(rx, self.fetch_timeout) {
            Some(Ok(Ok(items))) => {
                debug!(
                    "Fetched {} reminders ({:?}) in {}ms",
                    items.len(),
                    predicate.kind,
                    started.elapsed().as_millis()
                );
                Ok(items)
            }
            Some(Ok(Err(e))) => Err(ReminderError::Store(e)),
            Some(Err(_)) => Err(ReminderError::Store(StoreError::fetch(
                "completion dropped without a result",
            ))),
            None => match self.policy {
                TimeoutPolicy::Lenient => {
                    warn!(
                        "Fetch ({:?}) got no answer within {:?}, returning no results",
                        predicate.kind, self.fetch_timeout
                    );
                    Ok(Vec::new())
                }
                TimeoutPolicy::Strict => Err(ReminderError::Timeout(self.fetch_timeout)),
            },
        }
    }

    /// `None` on timeout.
    fn wait<T>(
        &self,
        rx: oneshot::Receiver<T>,
        timeout: Duration,
    ) -> Option<Result<T, oneshot::error::RecvError>> {
        self.runtime
            .block_on(async move { tokio::time::timeout(timeout, rx).await.ok() })
    }
}
