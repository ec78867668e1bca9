//! Structured logging using **tracing**.
//!
//! The analysis emits `debug!` events for every switch decision and one
//! `info!` summary per run. Nothing is printed unless a subscriber is
//! installed, so library users keep full control over output.

/// Initializes the global tracing subscriber.
///
/// Call *once* at the start of the process. Logs go to stderr as JSON so
/// they never mix with report output written to a file.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=exhaustive_core=debug`)
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
