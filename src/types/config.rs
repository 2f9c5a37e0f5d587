//! Configuration structures.
//!
//! `ServerConfiguration` mirrors the kernel connection file handed to the
//! transport server; `BridgeConfig` carries the knobs owned by the bridge
//! itself. Both are immutable once the bridge is constructed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// One communication channel of the kernel's multi-socket wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelId {
    /// Execute requests and replies.
    Shell,
    /// Out-of-band control messages (interrupt, shutdown).
    Control,
    /// Input requests from the kernel back to the frontend.
    Stdin,
    /// Broadcast of outputs and status.
    Iopub,
    /// Heartbeat echo channel.
    #[serde(rename = "hb")]
    Heartbeat,
}

impl ChannelId {
    /// All channels, in connection-file order.
    pub const ALL: [ChannelId; 5] = [
        ChannelId::Shell,
        ChannelId::Control,
        ChannelId::Stdin,
        ChannelId::Iopub,
        ChannelId::Heartbeat,
    ];
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelId::Shell => "shell",
            ChannelId::Control => "control",
            ChannelId::Stdin => "stdin",
            ChannelId::Iopub => "iopub",
            ChannelId::Heartbeat => "hb",
        };
        f.write_str(name)
    }
}

/// Message signing scheme declared in the connection file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureScheme {
    #[default]
    #[serde(rename = "hmac-sha256")]
    HmacSha256,
    /// Signing disabled (empty scheme string in the connection file).
    #[serde(rename = "")]
    None,
}

/// Policy forwarded to the transport's JSON layer for malformed payloads.
/// The bridge forwards this opaquely and never interprets JSON itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonErrorPolicy {
    /// Reject malformed payloads with an error.
    #[default]
    Strict,
    /// Replace invalid sequences with placeholders.
    Replace,
    /// Skip invalid sequences silently.
    Ignore,
}

/// Transport configuration for one kernel session.
///
/// Field names follow the kernel connection-file convention so a connection
/// file deserializes directly into this struct. Supplied once at bridge
/// construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfiguration {
    /// Transport scheme (`tcp` or `ipc`).
    pub transport: String,

    /// Bind address for every channel socket.
    pub ip: String,

    pub shell_port: u16,
    pub control_port: u16,
    pub stdin_port: u16,
    pub iopub_port: u16,
    pub hb_port: u16,

    /// Shared signing key (hex). Empty disables signing.
    pub key: String,

    pub signature_scheme: SignatureScheme,

    /// Forwarded to the transport's JSON layer; not part of the connection
    /// file proper, so it defaults when absent.
    pub json_error_policy: JsonErrorPolicy,
}

impl ServerConfiguration {
    /// Port assigned to a channel.
    pub fn port(&self, channel: ChannelId) -> u16 {
        match channel {
            ChannelId::Shell => self.shell_port,
            ChannelId::Control => self.control_port,
            ChannelId::Stdin => self.stdin_port,
            ChannelId::Iopub => self.iopub_port,
            ChannelId::Heartbeat => self.hb_port,
        }
    }
}

impl Default for ServerConfiguration {
    fn default() -> Self {
        Self {
            transport: "tcp".to_string(),
            ip: "127.0.0.1".to_string(),
            shell_port: 0,
            control_port: 0,
            stdin_port: 0,
            iopub_port: 0,
            hb_port: 0,
            key: String::new(),
            signature_scheme: SignatureScheme::default(),
            json_error_policy: JsonErrorPolicy::default(),
        }
    }
}

/// Bridge-owned configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Channels monitored by the recurring poll timer instead of native
    /// readiness notification. The stdin socket is known to generate
    /// continuous spurious readiness events on Windows and some Linux
    /// distributions, pinning a core at 100% while idle; which channels are
    /// affected varies by deployment target, so the set is configurable.
    pub polled_channels: Vec<ChannelId>,

    /// Poll timer period. Worst-case added message latency on a polled
    /// channel is one period.
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
}

impl BridgeConfig {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(15);
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            polled_channels: vec![ChannelId::Stdin],
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
        }
    }
}
