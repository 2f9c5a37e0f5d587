//! # Kernel Bridge - GUI Event Loop Integration for Kernel Transport Servers
//!
//! Bridges a multi-socket interactive-computation kernel server into a host
//! application's single-threaded cooperative GUI event loop:
//! - Socket readiness converted into event-loop callbacks, one per live
//!   transport socket
//! - Recurring poll-timer fallback for channels whose native readiness
//!   notification misbehaves (continuous spurious wakeups pinning a core)
//! - Start/stop lifecycle with clean rollback, safe to recreate per kernel
//!   session
//!
//! ## Architecture
//!
//! ```text
//!   GUI event loop (single thread, never blocks)
//!        │ readiness / tick callbacks
//!        ▼
//!   ┌─────────────────────────────────┐
//!   │          KernelBridge           │
//!   │  ┌──────────┐  ┌────────────┐   │
//!   │  │Notifiers │  │ Poll Timer │   │
//!   │  │ (per fd) │  │ (polled ch)│   │
//!   │  └──────────┘  └────────────┘   │
//!   └───────────────┬─────────────────┘
//!                   │ drain_pending(channel)
//!                   ▼
//!          KernelTransport (sockets, framing, signing)
//! ```
//!
//! All callbacks run on the event loop's thread; each performs one bounded
//! drain of the messages pending at invocation time and returns.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod bridge;
pub mod eventloop;
pub mod transport;
pub mod types;

// Internal utilities
pub mod observability;

pub use bridge::{make_bridged_server, BridgeState, KernelBridge};
pub use types::{BridgeConfig, ChannelId, Error, Result, ServerConfiguration};
