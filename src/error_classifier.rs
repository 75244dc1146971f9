use crate::client::error::DataClientError;
use log::LevelFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_reload_error(&self, error: &DataClientError) -> LogLevel {
        match error {
            // Non-critical: service asked us to slow down
            DataClientError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            DataClientError::Http { status, .. } if (500..=599).contains(status) => {
                LogLevel::Warn
            }

            // Critical: auth, malformed responses
            DataClientError::Http { status, .. } if *status == 401 => LogLevel::Error,
            DataClientError::Http { status, .. } if *status == 403 => LogLevel::Error,
            DataClientError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> DataClientError {
        DataClientError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_classify_http_statuses() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_reload_error(&http(429)), LogLevel::Debug);
        assert_eq!(classifier.classify_reload_error(&http(503)), LogLevel::Warn);
        assert_eq!(classifier.classify_reload_error(&http(401)), LogLevel::Error);
        assert_eq!(classifier.classify_reload_error(&http(403)), LogLevel::Error);
        assert_eq!(classifier.classify_reload_error(&http(404)), LogLevel::Warn);
    }

    #[test]
    fn test_classify_non_http_errors() {
        let classifier = ErrorClassifier::new();
        let decode = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert_eq!(
            classifier.classify_reload_error(&DataClientError::Decode(decode)),
            LogLevel::Error
        );
        assert_eq!(
            classifier.classify_reload_error(&DataClientError::Unavailable("offline".into())),
            LogLevel::Warn
        );
    }
}
