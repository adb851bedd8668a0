//! Logging setup utilities for the chat relay binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose log output is enabled at the default level.
const WORKSPACE_TARGETS: [&str; 4] = [
    "chatrelay_shared",
    "chatrelay_server",
    "chatrelay_client",
    "tower_http",
];

/// Initialize the tracing subscriber with the specified default log level.
///
/// Logging is enabled for every workspace crate and for the binary itself.
/// The filter can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "chatrelay-server")
/// * `default_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use chatrelay_shared::logger::setup_logger;
///
/// setup_logger("chatrelay-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(binary_name, default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_directives(binary_name: &str, default_level: &str) -> String {
    WORKSPACE_TARGETS
        .iter()
        .map(|target| target.to_string())
        .chain(std::iter::once(binary_name.replace('-', "_")))
        .map(|target| format!("{}={}", target, default_level))
        .collect::<Vec<_>>()
        .join(",")
}
