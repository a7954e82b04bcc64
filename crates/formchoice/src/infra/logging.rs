//! Tracing subscriber setup.

/// Install the global fmt subscriber, writing to stderr so rendered markup on stdout stays clean.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
