//! Shared pieces of the `md2ast` and `span-probe` binaries

pub mod config;
pub mod input;

use log::LevelFilter;

/// Initialize `env_logger`: `warn` by default, `debug` with `verbose`,
/// `error` with `quiet`. `RUST_LOG` is applied on top.
pub fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}
