use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// JSON log lines on stdout for the id manager binaries. Issuance and
/// registration events carry `entity_name`, `field_name`, `sequence_name` and
/// `generated_id` as structured fields. Filtered by `RUST_LOG`, default `info`.
///
/// Only the first call installs the subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .try_init();
}
