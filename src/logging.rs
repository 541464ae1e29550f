//! Logging setup.
//!
//! The library only emits `tracing` events. Binaries and tests that want to
//! see them call [`init_tracing`] once at startup and control verbosity with
//! `RUST_LOG`, e.g. `RUST_LOG=barcode_reader=trace`.

/// Initializes the tracing subscriber with an env filter and a fmt layer.
///
/// Calling it a second time is harmless; the second registration is ignored.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
