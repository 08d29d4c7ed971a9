//! Logging setup
//!
//! Library code only emits `tracing` events. Binaries and tests pick a
//! subscriber here.

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_TEST_LOGGING: Once = Once::new();

/// Level for a `-v` count: 0 = warn, 1 = info, 2 = debug, 3+ = trace
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install a stderr subscriber for the CLI
///
/// `RUST_LOG` wins over `verbosity` when set. Calling twice is a no-op.
pub fn init_cli_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity).as_str()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Install a test-writer subscriber; only the first call has an effect
pub fn init_test_logging() {
    INIT_TEST_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .with_ansi(false)
            .try_init();
    });
}
