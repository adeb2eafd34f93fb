//! xorstripe demo binary
//!
//! Stores a payload across an erasure-coded group, injects a single unit
//! failure, and recovers the payload from the survivors.

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use xorstripe::{GroupState, StorageGroup};

const DEFAULT_PAYLOAD: &str = "This is the data that will be distributed \
and then we will destroy one drive once done! we will recover data";

// =============================================================================
// CLI Arguments
// =============================================================================

/// Single-parity erasure coding demo: store, fail one unit, recover
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of data units (k); the group holds k+1 units total
    #[arg(long, env = "DATA_UNITS", default_value = "3")]
    data_units: usize,

    /// Unit to fail after storing (0..=k; k is the parity unit)
    #[arg(long, env = "FAIL_UNIT", default_value = "1")]
    fail_unit: usize,

    /// Payload to store
    #[arg(long, env = "PAYLOAD", default_value = DEFAULT_PAYLOAD)]
    payload: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args);

    info!("Starting erasure coding demo");
    info!("  Data units: {}", args.data_units);
    info!("  Parity unit: {}", args.data_units);
    info!("  Unit to fail: {}", args.fail_unit);
    info!("  Payload length: {} bytes", args.payload.len());

    let mut group = StorageGroup::new(args.data_units)?;

    group.store_payload(args.payload.as_bytes())?;
    info!(state = ?group.group_state(), "payload stored");

    warn!("injecting failure on unit {}", args.fail_unit);
    group.inject_failure(args.fail_unit)?;

    if group.group_state() != GroupState::Degraded {
        anyhow::bail!("expected degraded group, got {:?}", group.group_state());
    }

    let recovered = group.recover_payload()?;
    if recovered != args.payload.as_bytes() {
        anyhow::bail!("recovered payload does not match the original");
    }

    info!(
        "Recovered payload: {}",
        String::from_utf8_lossy(&recovered)
    );
    Ok(())
}

/// Initialize the tracing subscriber
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}
