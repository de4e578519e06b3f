//! Tracing setup
//!
//! Logs go to stderr so widget output on stdout stays clean. `RUST_LOG`
//! overrides the level picked from the command line.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::args::Verbosity;

/// Build filter directives for a verbosity level
///
/// Dependencies stay at `warn` (or `error` when quiet); only this crate
/// follows `-v`.
pub fn build_filter_directives(verbosity: Verbosity) -> String {
    let base = match verbosity {
        Verbosity::Quiet => "error",
        _ => "warn",
    };
    format!("{},medisense={}", base, verbosity.log_filter())
}

/// Initialize tracing for the process
pub fn init_tracing(verbosity: Verbosity) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter_str = build_filter_directives(verbosity);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity == Verbosity::VeryVerbose),
        )
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        assert_eq!(build_filter_directives(Verbosity::Quiet), "error,medisense=error");
        assert_eq!(build_filter_directives(Verbosity::Normal), "warn,medisense=warn");
        assert_eq!(build_filter_directives(Verbosity::Verbose), "warn,medisense=info");
        assert_eq!(build_filter_directives(Verbosity::VeryVerbose), "warn,medisense=debug");
    }

    #[test]
    fn test_directives_parse() {
        for v in [Verbosity::Quiet, Verbosity::Normal, Verbosity::Verbose, Verbosity::VeryVerbose] {
            assert!(EnvFilter::try_new(build_filter_directives(v)).is_ok());
        }
    }
}
