//! Telemetry facade: installs the global tracing subscriber from settings.

use corkboard_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing/logging pipeline.
///
/// The filter directive comes from settings, falling back to `RUST_LOG`
/// and then to `info`. Idempotent: a second call is a no-op, so tests may
/// call this freely.
pub fn init(settings: &TelemetrySettings) {
    let filter = settings
        .filter
        .as_deref()
        .map(EnvFilter::new)
        .unwrap_or_else(|| {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match settings.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    if installed.is_err() {
        tracing::debug!(target: "corkboard-telemetry", "subscriber already installed");
    }
}
