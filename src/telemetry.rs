//! Opt-in tracing setup for hosts embedding `raster-chart`.
//!
//! The library itself only emits `tracing` events. Hosts either call
//! [`init_default_tracing`] once at startup or install their own subscriber.

/// Default filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "raster_chart=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG` (or
/// [`DEFAULT_FILTER`]).
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
