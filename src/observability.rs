//! Observability utilities.
//!
//! The bridge is embedded in a host application that may already install a
//! global subscriber, so initialization here is optional and best-effort.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Install a process-wide tracing subscriber, once.
///
/// Intended for hosts without their own subscriber. The filter comes from
/// `RUST_LOG` (default `info`); `KERNEL_BRIDGE_LOG_FORMAT=json` switches to
/// JSON output. Loses the race silently if the host installed one first.
pub fn init_tracing() {
    TRACING_INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let wants_json = matches!(
            std::env::var("KERNEL_BRIDGE_LOG_FORMAT").as_deref(),
            Ok(v) if v.eq_ignore_ascii_case("json")
        );

        let registry = tracing_subscriber::registry().with(filter);
        let result = if wants_json {
            registry.with(fmt::layer().json()).try_init()
        } else {
            registry.with(fmt::layer().compact()).try_init()
        };

        // Err means the host already owns the global subscriber.
        let _ = result;
    });
}
