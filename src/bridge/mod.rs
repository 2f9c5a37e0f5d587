//! GUI-integrated kernel server adapter — the core of this crate.
//!
//! The transport server was designed to run its own blocking poll loop
//! across the protocol sockets; the host application already owns a
//! single-threaded GUI event loop that must never block. `KernelBridge`
//! reconciles the two: on start it registers one readiness callback per
//! live socket with the host's event loop, and on every callback it asks
//! the transport to drain exactly the messages currently pending.
//!
//! Channels listed in [`BridgeConfig::polled_channels`] are not watched
//! natively. Their readiness notification is known to fire continuously on
//! some platforms, which pins a core at 100% while the application is idle;
//! those channels are swept by a single recurring timer instead, trading a
//! worst-case latency of one timer period for near-zero idle CPU.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::eventloop::{Callback, EventLoop, TimerToken, WatchToken};
use crate::transport::KernelTransport;
use crate::types::{BridgeConfig, ChannelId, Error, Result};

/// Adapter lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Stopped,
    Running,
}

/// Bridges a kernel transport server into the host's GUI event loop.
///
/// Owns its event-loop registrations exclusively; holds the transport's
/// socket set only by reference (socket lifetime is governed by the
/// transport). Created `Stopped`; dropping a running bridge performs an
/// implicit [`stop`](KernelBridge::stop).
pub struct KernelBridge {
    event_loop: Rc<dyn EventLoop>,
    transport: Rc<RefCell<dyn KernelTransport>>,
    polled_channels: Vec<ChannelId>,
    /// Poll interval kept in caller units so the getter returns exactly
    /// what the setter accepted.
    poll_secs: f64,
    state: BridgeState,
    notifiers: Vec<WatchToken>,
    poll_timer: Option<TimerToken>,
}

impl KernelBridge {
    pub fn new(
        event_loop: Rc<dyn EventLoop>,
        transport: Rc<RefCell<dyn KernelTransport>>,
        config: BridgeConfig,
    ) -> Self {
        let poll_interval = if config.poll_interval.is_zero() {
            tracing::warn!(
                "configured poll interval is zero; using default {:?}",
                BridgeConfig::DEFAULT_POLL_INTERVAL
            );
            BridgeConfig::DEFAULT_POLL_INTERVAL
        } else {
            config.poll_interval
        };

        Self {
            event_loop,
            transport,
            polled_channels: config.polled_channels,
            poll_secs: poll_interval.as_secs_f64(),
            state: BridgeState::Stopped,
            notifiers: Vec::new(),
            poll_timer: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BridgeState {
        self.state
    }

    /// Open the transport sockets and register their callbacks with the
    /// event loop.
    ///
    /// Channels in the polled set are routed through the recurring timer;
    /// every other live socket gets a readiness notifier. On any failure,
    /// everything registered so far is torn down, the transport is told to
    /// close its sockets, and the bridge stays `Stopped`.
    pub fn start(&mut self) -> Result<()> {
        if self.state == BridgeState::Running {
            return Err(Error::state_transition("bridge is already running"));
        }

        self.transport
            .borrow_mut()
            .open_sockets()
            .map_err(|err| Error::startup(format!("transport failed to open sockets: {err}")))?;

        let sockets = self.transport.borrow().live_sockets();
        let mut polled = Vec::new();
        for socket in sockets {
            if self.polled_channels.contains(&socket.channel) {
                polled.push(socket.channel);
                continue;
            }
            let watched = self
                .event_loop
                .watch_readable(socket.fd, self.drain_callback(socket.channel));
            match watched {
                Ok(token) => self.notifiers.push(token),
                Err(err) => {
                    self.teardown();
                    return Err(Error::startup(format!(
                        "failed to watch {} socket: {err}",
                        socket.channel
                    )));
                }
            }
        }

        if !polled.is_empty() {
            let period = Duration::from_secs_f64(self.poll_secs);
            let timer = self
                .event_loop
                .start_interval(period, self.poll_callback(polled));
            match timer {
                Ok(token) => self.poll_timer = Some(token),
                Err(err) => {
                    self.teardown();
                    return Err(Error::startup(format!(
                        "failed to start poll timer: {err}"
                    )));
                }
            }
        }

        self.state = BridgeState::Running;
        tracing::info!(
            notifiers = self.notifiers.len(),
            polled = self.poll_timer.is_some(),
            "kernel bridge started"
        );
        Ok(())
    }

    /// Unregister every callback and close the transport sockets.
    ///
    /// Idempotent: calling while already `Stopped` is a no-op with no
    /// observable side effect. Teardown is best-effort and total.
    pub fn stop(&mut self) {
        if self.state == BridgeState::Stopped {
            return;
        }
        self.teardown();
        self.state = BridgeState::Stopped;
        tracing::info!("kernel bridge stopped");
    }

    /// Set the poll timer period, in seconds.
    ///
    /// Rejects non-positive and non-finite values without touching the
    /// current interval. While running, the new period applies from the
    /// timer's next scheduled tick.
    pub fn set_poll_interval_secs(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::invalid_argument(format!(
                "poll interval must be positive and finite, got {value}"
            )));
        }
        let period = Duration::try_from_secs_f64(value).map_err(|err| {
            Error::invalid_argument(format!("poll interval {value} out of range: {err}"))
        })?;

        self.poll_secs = value;
        if let Some(token) = self.poll_timer {
            self.event_loop.reschedule(token, period);
        }
        tracing::debug!(poll_interval_secs = value, "poll interval updated");
        Ok(())
    }

    /// Currently configured poll timer period, in seconds.
    pub fn poll_interval_secs(&self) -> f64 {
        self.poll_secs
    }

    /// Destroy all owned registrations and close the transport sockets.
    /// Never fails; unknown/duplicate deregistration is a no-op.
    fn teardown(&mut self) {
        for token in self.notifiers.drain(..) {
            self.event_loop.unwatch(token);
        }
        if let Some(token) = self.poll_timer.take() {
            self.event_loop.cancel_interval(token);
        }
        self.transport.borrow_mut().close_sockets();
    }

    /// Readiness callback for one natively watched channel: a single
    /// bounded drain. Messages arriving during processing are left for the
    /// next notification so one callback can never starve the event loop.
    fn drain_callback(&self, channel: ChannelId) -> Callback {
        let transport = Rc::clone(&self.transport);
        Box::new(move || {
            let mut transport = transport.borrow_mut();
            if let Err(err) = transport.drain_pending(channel) {
                // Must not escape into the event loop; report and return.
                transport.report_error(channel, &err);
            }
        })
    }

    /// Timer callback sweeping every polled channel: drain only those with
    /// data, otherwise do nothing until the next tick.
    fn poll_callback(&self, channels: Vec<ChannelId>) -> Callback {
        let transport = Rc::clone(&self.transport);
        Box::new(move || {
            let mut transport = transport.borrow_mut();
            for &channel in &channels {
                if !transport.has_pending(channel) {
                    continue;
                }
                if let Err(err) = transport.drain_pending(channel) {
                    transport.report_error(channel, &err);
                }
            }
        })
    }
}

impl fmt::Debug for KernelBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelBridge")
            .field("state", &self.state)
            .field("polled_channels", &self.polled_channels)
            .field("poll_secs", &self.poll_secs)
            .field("notifiers", &self.notifiers.len())
            .field("poll_timer", &self.poll_timer)
            .finish()
    }
}

impl Drop for KernelBridge {
    fn drop(&mut self) {
        if self.state == BridgeState::Running {
            self.stop();
        }
    }
}

/// Build a bridge from the host's event loop, a kernel transport server,
/// and the bridge configuration. This is the sole constructor surface
/// consumed by hosting applications.
pub fn make_bridged_server(
    event_loop: Rc<dyn EventLoop>,
    transport: Rc<RefCell<dyn KernelTransport>>,
    config: BridgeConfig,
) -> KernelBridge {
    KernelBridge::new(event_loop, transport, config)
}
