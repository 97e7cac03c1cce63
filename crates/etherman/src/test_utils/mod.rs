/// Test utils for arbitrary.
pub mod arbitrary;

/// Builders for the L1 chain fixtures.
pub mod fixtures;

mod reader;
pub use reader::MockChainReader;

/// Initializes a tracing subscriber for tests, logging the etherman targets.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("zkevm::etherman=trace")),
        )
        .with_test_writer()
        .try_init();
}
