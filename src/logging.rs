use tracing_subscriber::EnvFilter;

/// Initialize tracing and bridge `log` records into it.
/// Safe to call more than once; later attempts are ignored.
pub fn init_tracing() {
    // Bridge `log` macros into `tracing` so the `log` facade is captured
    let _ = tracing_log::LogTracer::init();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init so repeated calls (e.g. from tests) don't panic
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .ok();
}
