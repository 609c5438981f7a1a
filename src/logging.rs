use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a `tracing` filter such as `assurance=debug`.
pub const LOG_ENV: &str = "ASSURANCE_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs the stderr subscriber. The filter comes from `ASSURANCE_LOG`,
/// then from the configuration file, then defaults to `warn`. Calling this
/// twice is harmless; the first subscriber stays.
pub fn init(configured: Option<&str>) {
    let directive = filter_directive(std::env::var(LOG_ENV).ok(), configured);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}

fn filter_directive(env: Option<String>, configured: Option<&str>) -> String {
    env.filter(|value| !value.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_wins_over_config() {
        assert_eq!(
            filter_directive(Some("trace".into()), Some("info")),
            "trace"
        );
        assert_eq!(filter_directive(Some(" ".into()), Some("info")), "info");
        assert_eq!(filter_directive(None, None), DEFAULT_FILTER);
    }
}
