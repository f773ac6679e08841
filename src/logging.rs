use tracing_subscriber::EnvFilter;

const QUIET_FILTER: &str = "vidgrab=warn";
const VERBOSE_FILTER: &str = "vidgrab=info";

// stdout carries the JSON result, so logs always go to stderr.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            VERBOSE_FILTER.into()
        } else {
            QUIET_FILTER.into()
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
