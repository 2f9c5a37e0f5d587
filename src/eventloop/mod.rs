//! GUI event loop capability consumed by the bridge.
//!
//! The host application owns a single-threaded cooperative event loop. The
//! bridge needs exactly two things from it: "call me when this descriptor
//! becomes readable" and "call me every N milliseconds". Abstracting those
//! behind a trait keeps the bridge free of any GUI dependency and testable
//! against a synthetic loop.
//!
//! All callbacks run on the event loop's thread; implementations must not
//! introduce parallelism.

use std::os::fd::RawFd;
use std::time::Duration;

use crate::types::Result;

/// A registered event-loop callback. Runs on the loop thread, must not
/// block, and must perform a bounded amount of work per invocation.
pub type Callback = Box<dyn FnMut()>;

/// Handle to a readiness watch registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchToken(u64);

impl WatchToken {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Handle to a recurring timer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Minimal event-loop surface: readiness watches and recurring timers.
///
/// Deregistration is infallible and best-effort: unknown tokens are ignored,
/// so teardown can always run to completion.
pub trait EventLoop {
    /// Invoke `callback` whenever `fd` has data available to read.
    ///
    /// The callback must drain the descriptor; readiness is edge-style, so
    /// data left unread may not trigger another invocation.
    fn watch_readable(&self, fd: RawFd, callback: Callback) -> Result<WatchToken>;

    /// Remove a readiness watch. No-op for unknown tokens.
    fn unwatch(&self, token: WatchToken);

    /// Invoke `callback` every `period`, starting one period from now.
    fn start_interval(&self, period: Duration, callback: Callback) -> Result<TimerToken>;

    /// Change a timer's period. Takes effect from the timer's next scheduled
    /// tick; the tick already in flight keeps the old period.
    fn reschedule(&self, token: TimerToken, period: Duration);

    /// Cancel a recurring timer. No-op for unknown tokens.
    fn cancel_interval(&self, token: TimerToken);
}

mod tokio_loop;

pub use tokio_loop::TokioEventLoop;
