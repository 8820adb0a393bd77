//! Async helpers for waiting on plain conditions, notifications and OS threads.
//! A timeout is reported as [`WaitOutcome::TimedOut`], never as an error.

use std::{
    thread::{self, JoinHandle},
    time::Duration,
};

use tokio::{sync::Notify, time};
use tracing::debug;

const THREAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Satisfied,
    TimedOut,
}

impl WaitOutcome {
    pub fn is_satisfied(self) -> bool {
        self == WaitOutcome::Satisfied
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// `None` waits forever
    pub timeout: Option<Duration>,
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            poll_interval: Duration::from_millis(25),
        }
    }
}

impl WaitOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Default::default()
        }
    }

    pub fn poll_every(self, poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            ..self
        }
    }
}

async fn bounded<F>(limit: Option<Duration>, future: F) -> WaitOutcome
where
    F: std::future::Future<Output = ()>,
{
    let Some(limit) = limit else {
        future.await;
        return WaitOutcome::Satisfied;
    };
    match time::timeout(limit, future).await {
        Ok(()) => WaitOutcome::Satisfied,
        Err(_) => {
            debug!(?limit, "wait timed out");
            WaitOutcome::TimedOut
        }
    }
}

/// Poll `condition` until it returns false
pub async fn wait_while(mut condition: impl FnMut() -> bool, options: WaitOptions) -> WaitOutcome {
    let poll = async {
        while condition() {
            time::sleep(options.poll_interval).await;
        }
    };
    bounded(options.timeout, poll).await
}

/// Poll `condition` until it returns true
pub async fn wait_until(mut condition: impl FnMut() -> bool, options: WaitOptions) -> WaitOutcome {
    wait_while(move || !condition(), options).await
}

/// Wait for a permit from `notify`, consuming it like an auto-reset event
pub async fn wait_notified(notify: &Notify, timeout: Option<Duration>) -> WaitOutcome {
    bounded(timeout, notify.notified()).await
}

/// Await an OS thread without blocking the executor
pub async fn join_thread<T>(handle: JoinHandle<T>) -> thread::Result<T> {
    while !handle.is_finished() {
        time::sleep(THREAD_POLL_INTERVAL).await;
    }
    handle.join()
}
