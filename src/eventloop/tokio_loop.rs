//! Tokio-backed event loop implementation.
//!
//! For hosts whose GUI loop is (or embeds) a current-thread tokio runtime.
//! Every registration is a `spawn_local` task, so everything stays on the
//! loop thread; teardown cancels the task via a per-registration
//! `CancellationToken`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::os::fd::RawFd;
use std::time::Duration;

use tokio::io::unix::AsyncFd;
use tokio::io::Interest;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::eventloop::{Callback, EventLoop, TimerToken, WatchToken};
use crate::types::Result;

#[derive(Debug)]
struct TimerEntry {
    cancel: CancellationToken,
    period: watch::Sender<Duration>,
}

/// Single-threaded event loop on tokio primitives.
///
/// Must be used from within a `tokio::task::LocalSet` running on a
/// current-thread runtime; registrations call `spawn_local`.
#[derive(Debug, Default)]
pub struct TokioEventLoop {
    next_id: Cell<u64>,
    watches: RefCell<HashMap<u64, CancellationToken>>,
    timers: RefCell<HashMap<u64, TimerEntry>>,
}

impl TokioEventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl EventLoop for TokioEventLoop {
    fn watch_readable(&self, fd: RawFd, mut callback: Callback) -> Result<WatchToken> {
        let afd = AsyncFd::with_interest(fd, Interest::READABLE)?;
        let cancel = CancellationToken::new();
        let id = self.alloc_id();
        self.watches.borrow_mut().insert(id, cancel.clone());

        tokio::task::spawn_local(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    ready = afd.readable() => match ready {
                        Ok(mut guard) => {
                            // One bounded drain per readiness edge. The
                            // callback must consume what is pending; clearing
                            // ready state re-arms the next edge.
                            callback();
                            guard.clear_ready();
                        }
                        Err(err) => {
                            tracing::warn!(fd, "readiness watch ended: {err}");
                            break;
                        }
                    }
                }
            }
        });

        Ok(WatchToken::new(id))
    }

    fn unwatch(&self, token: WatchToken) {
        if let Some(cancel) = self.watches.borrow_mut().remove(&token.id()) {
            cancel.cancel();
        }
    }

    fn start_interval(&self, period: Duration, mut callback: Callback) -> Result<TimerToken> {
        let cancel = CancellationToken::new();
        let (tx, rx) = watch::channel(period);
        let id = self.alloc_id();
        self.timers.borrow_mut().insert(
            id,
            TimerEntry {
                cancel: cancel.clone(),
                period: tx,
            },
        );

        tokio::task::spawn_local(async move {
            loop {
                // Period is sampled per tick: a reschedule lands on the next
                // scheduled tick, never re-firing the one in flight.
                let period = *rx.borrow();
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(period) => callback(),
                }
            }
        });

        Ok(TimerToken::new(id))
    }

    fn reschedule(&self, token: TimerToken, period: Duration) {
        if let Some(entry) = self.timers.borrow().get(&token.id()) {
            let _ = entry.period.send(period);
        }
    }

    fn cancel_interval(&self, token: TimerToken) {
        if let Some(entry) = self.timers.borrow_mut().remove(&token.id()) {
            entry.cancel.cancel();
        }
    }
}
