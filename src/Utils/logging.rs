use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Initialize a console logger so the non-fatal warnings of the kinetics
/// core (k = 0 constants, b = 0 modified Arrhenius, unused document fields)
/// become visible. Repeated calls are harmless, only the first one wins.
pub fn init_console_logger(level: LevelFilter) {
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_console_logger(LevelFilter::Warn);
        init_console_logger(LevelFilter::Warn);
        log::warn!("logger initialized");
    }
}
