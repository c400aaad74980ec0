use std::io;

use tracing::Level;

/// Map the number of `-v` flags to a maximum log level. Warnings are always
/// shown since they flag things like an empty selection.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize the tracing subscriber on stderr. Stdout is reserved for
/// converted text. Safe to call multiple times; subsequent calls are no-ops
/// for the global subscriber.
pub fn init(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_for(verbosity))
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .without_time()
        .try_init();
}
