//! Tracing subscriber setup driven by the loaded configuration.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::domain::models::config::LoggingConfig;

/// Initialize the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies. Logs go
/// to stderr so scenario output on stdout stays clean. Calling this twice is
/// a no-op rather than an error, which keeps tests that share a process
/// harmless.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    // Already initialized: keep the existing subscriber.
    drop(result);
}
