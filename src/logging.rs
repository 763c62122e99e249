//! Console logging through `fern`.

use log::LevelFilter;

/// The level logged by default: everything in debug builds, info and up otherwise.
pub fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Formats a record as `[HH:MM:SS.mmm LEVEL target] message`.
fn format_line(time: &str, level: log::Level, target: &str, message: &std::fmt::Arguments) -> String {
    format!("[{time} {level:<5} {target}] {message}")
}

/// Installs the global stdout logger. Fails if a logger is already set.
pub fn init() -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let time = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
            out.finish(format_args!(
                "{}",
                format_line(&time, record.level(), record.target(), message)
            ))
        })
        .level(default_level())
        .chain(std::io::stdout())
        .apply()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_layout() {
        let line = format_line(
            "12:00:01.250",
            log::Level::Info,
            "gl_practice::abs::app",
            &format_args!("linked"),
        );
        assert_eq!(line, "[12:00:01.250 INFO  gl_practice::abs::app] linked");
    }

    #[test]
    fn debug_builds_log_debug() {
        assert_eq!(default_level() == LevelFilter::Debug, cfg!(debug_assertions));
    }
}
