use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static INIT: Once = Once::new();

/// Installs a stdout subscriber filtered by `RUST_LOG` (default `info`).
/// Later calls are no-ops.
pub fn setup_telemetry() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let stdout_layer = fmt::Layer::new()
            .with_test_writer()
            .with_ansi(true)
            .with_filter(env_filter);

        // Another subscriber may already be installed by the test harness.
        let _ = tracing_subscriber::registry().with(stdout_layer).try_init();
    });
}
