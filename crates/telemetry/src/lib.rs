//! Logging bootstrap built on tracing-subscriber.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use biblio_kernel::settings::{LogFormat, TelemetrySettings};

/// Install the global tracing subscriber.
///
/// Filtering honors `RUST_LOG` when set and defaults to `info` otherwise.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    tracing::debug!(log_format = ?settings.log_format, "telemetry initialized");
    Ok(())
}
