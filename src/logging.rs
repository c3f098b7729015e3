//! Logging setup.
//!
//! Tracing output goes to stderr; the window is the UI. The level can be
//! controlled via the `RUST_LOG` environment variable.
//!
//! Default log levels:
//! - `mu_player` modules: INFO
//! - Other crates (wgpu, cosmic-text, symphonia, ...): WARN

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "mu_player=info,warn";

pub fn init_logging() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!("logging initialized");
    Ok(())
}
