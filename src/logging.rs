use crate::error_classifier::LogLevel;
use std::env;

const CRATE_TARGET: &str = "sales_dashboard";

/// Level requested for this crate through `RUST_LOG`, `Info` when unset.
pub fn get_rust_log_level() -> LogLevel {
    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    parse_rust_log_level(&rust_log)
}

/// Pick the level for this crate out of a `RUST_LOG` directive list.
///
/// A `sales_dashboard=<level>` directive wins over a bare global level;
/// directives for other targets are ignored.
pub fn parse_rust_log_level(rust_log: &str) -> LogLevel {
    let mut global = None;
    for directive in rust_log.split(',').map(str::trim) {
        match directive.split_once('=') {
            Some((target, level)) if target == CRATE_TARGET => {
                if let Some(level) = level_from_str(level) {
                    return level;
                }
            }
            Some(_) => {}
            None => global = global.or_else(|| level_from_str(directive)),
        }
    }
    global.unwrap_or(LogLevel::Info)
}

fn level_from_str(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "trace" => Some(LogLevel::Trace),
        "debug" => Some(LogLevel::Debug),
        "info" => Some(LogLevel::Info),
        "warn" | "warning" => Some(LogLevel::Warn),
        "error" => Some(LogLevel::Error),
        _ => None,
    }
}

pub fn should_log(event_level: LogLevel, threshold: LogLevel) -> bool {
    event_level >= threshold
}

pub fn should_log_with_env(event_level: LogLevel) -> bool {
    should_log(event_level, get_rust_log_level())
}

/// Install the stderr logger for console modes.
///
/// The TUI owns the terminal, so it shows events in its activity panel and
/// never calls this.
pub fn init_console_logger() {
    let _ = env_logger::Builder::new()
        .filter_level(get_rust_log_level().into())
        .format_timestamp_secs()
        .format_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_level() {
        assert_eq!(parse_rust_log_level("debug"), LogLevel::Debug);
        assert_eq!(parse_rust_log_level("WARN"), LogLevel::Warn);
        assert_eq!(parse_rust_log_level("warning"), LogLevel::Warn);
        assert_eq!(parse_rust_log_level("error"), LogLevel::Error);
        assert_eq!(parse_rust_log_level("trace"), LogLevel::Trace);
    }

    #[test]
    fn test_crate_directive_wins_over_global() {
        assert_eq!(
            parse_rust_log_level("warn,sales_dashboard=debug"),
            LogLevel::Debug
        );
        assert_eq!(
            parse_rust_log_level("reqwest=trace, error"),
            LogLevel::Error
        );
    }

    #[test]
    fn test_unparseable_falls_back_to_info() {
        assert_eq!(parse_rust_log_level("invalid"), LogLevel::Info);
        assert_eq!(parse_rust_log_level("hyper=debug"), LogLevel::Info);
        assert_eq!(parse_rust_log_level(""), LogLevel::Info);
    }

    #[test]
    fn test_should_log() {
        assert!(should_log(LogLevel::Error, LogLevel::Debug));
        assert!(should_log(LogLevel::Warn, LogLevel::Warn));
        assert!(!should_log(LogLevel::Debug, LogLevel::Error));
    }
}
