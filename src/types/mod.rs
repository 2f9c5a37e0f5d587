//! Core types for the kernel bridge.
//!
//! This module provides foundational types used throughout the system:
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Channel identities, transport and bridge configuration

mod config;
mod errors;

pub use config::{BridgeConfig, ChannelId, JsonErrorPolicy, ServerConfiguration, SignatureScheme};
pub use errors::{Error, Result};
