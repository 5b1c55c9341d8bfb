use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber, writing to stderr so `extract` can use stdout.
///
/// `RUST_LOG` wins when set; otherwise the verbosity flags pick the level.
pub fn init(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // a subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
