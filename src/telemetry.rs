//! src/telemetry.rs
use tracing_subscriber::prelude::*;

/// Installs the global subscriber. `RUST_LOG` takes precedence over
/// `default_directive`.
pub fn init_tracing(default_directive: &str) -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_target(false),
        )
        .try_init()?;

    Ok(())
}
