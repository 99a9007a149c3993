use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "FACETTE_LOG";

/// Installs the stderr subscriber; stdout stays reserved for command output.
pub(crate) fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("failed to initialize tracing: {err}");
    }
}
