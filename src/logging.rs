// Diagnostic logging for wordfuzz
// Log records go to stderr so they never mix into the progress line on stdout

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode, TestLogger};

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the stderr logger. Does nothing if a logger is already set.
pub fn initialize(verbose: bool) {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();

    let _ = TermLogger::init(
        level_for(verbose),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

/// Logger for tests; safe to call from every test.
pub fn init_for_tests() {
    let _ = TestLogger::init(LevelFilter::Trace, simplelog::Config::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_level() {
        assert_eq!(level_for(false), LevelFilter::Warn);
        assert_eq!(level_for(true), LevelFilter::Debug);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_for_tests();
        init_for_tests();
        initialize(true);
    }
}
