use tracing_subscriber::EnvFilter;

/// Workspace crate targets that receive log output.
const CRATE_TARGETS: &[&str] = &[
    "wavematch",
    "wavematch_detect",
    "wavematch_io",
    "wavematch_stats",
    "wavematch_wavelet",
];

/// Maps the `-v` count to a level name: none -> warn, `-v` -> info,
/// `-vv` -> debug, anything more -> trace.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directive enabling `level` for every workspace crate.
fn default_directive(level: &str) -> String {
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing from the CLI verbosity. `RUST_LOG` wins when set.
///
/// Logs go to stderr; stdout carries the detected intervals.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level_for(verbosity))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
