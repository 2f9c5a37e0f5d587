//! Seam to the pre-existing multi-socket kernel transport server.
//!
//! The transport server owns the protocol sockets, message framing, signing,
//! and reply dispatch. The bridge only needs to open/close the socket set,
//! enumerate live descriptors, and drain whatever is pending on one channel.
//! Keeping this surface a trait lets the bridge run against a mock transport
//! in tests, with no wire protocol in sight.

use std::os::fd::RawFd;

use crate::types::{ChannelId, Error, Result};

/// One live transport socket: its protocol channel and its descriptor.
///
/// The descriptor is borrowed knowledge, not ownership; socket lifetime is
/// governed by the transport server between `open_sockets` and
/// `close_sockets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocketRef {
    pub channel: ChannelId,
    pub fd: RawFd,
}

/// Capabilities the bridge consumes from the kernel transport server.
///
/// **Contract:**
/// - `drain_pending` processes exactly the messages pending at call time and
///   returns, never blocking for future ones. Per-channel arrival order is
///   preserved within one call.
/// - `live_sockets` is only meaningful between a successful `open_sockets`
///   and the next `close_sockets`.
/// - `close_sockets` is best-effort and safe to call when nothing is open.
pub trait KernelTransport {
    /// Bind and open every channel socket described by the
    /// [`ServerConfiguration`](crate::types::ServerConfiguration) the
    /// transport was constructed with.
    fn open_sockets(&mut self) -> Result<()>;

    /// Close every channel socket. Invalidates previously returned
    /// [`SocketRef`]s.
    fn close_sockets(&mut self);

    /// The currently open sockets, one per live channel.
    fn live_sockets(&self) -> Vec<SocketRef>;

    /// Whether at least one complete message is waiting on `channel`.
    fn has_pending(&self, channel: ChannelId) -> bool;

    /// Receive and process every message currently pending on `channel`.
    /// Returns the number of messages processed.
    fn drain_pending(&mut self, channel: ChannelId) -> Result<usize>;

    /// Report a message-processing error through the transport's own error
    /// path (e.g. as a kernel error reply). Callbacks route drain failures
    /// here instead of letting them escape into the event loop.
    fn report_error(&mut self, channel: ChannelId, error: &Error) {
        tracing::error!(%channel, "error while draining pending messages: {error}");
    }
}
