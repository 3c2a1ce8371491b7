//! # Telemetry
//!
//! Structured logging setup. Events and spans are emitted as bunyan-style
//! JSON lines; the level filter comes from `RUST_LOG` and falls back to the
//! default passed by the caller.

use tracing::Subscriber;
use tracing::subscriber::{SetGlobalDefaultError, set_global_default};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, Registry, fmt::MakeWriter, layer::SubscriberExt};

/// Composes the subscriber writing JSON records to `sink`.
///
/// # Arguments
///
/// * `name` - Service name written into every record
/// * `default_filter` - Filter directive used when `RUST_LOG` is unset
/// * `sink` - Destination of the records, e.g. `std::io::stdout`
pub fn get_subscriber<Sink>(
    name: String,
    default_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Installs `subscriber` as the process-wide default.
///
/// # Errors
///
/// Fails if a global subscriber has already been set.
pub fn init_subscriber(
    subscriber: impl Subscriber + Send + Sync,
) -> Result<(), SetGlobalDefaultError> {
    set_global_default(subscriber)
}
