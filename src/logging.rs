use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Installs a terminal logger for embedding applications. Later calls are
/// no-ops once a global logger is set, so tests and multiple views can all
/// call this safely.
pub fn init(level: LevelFilter) {
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}
