//! Console messages for one-shot commands and session start/stop.
//!
//! Everything here goes to stdout with a colored tag; diagnostics go through
//! `log` instead.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warn,
    Error,
    Success,
}

impl MessageKind {
    fn tag(self) -> &'static str {
        match self {
            MessageKind::Info => "INFO",
            MessageKind::Warn => "WARN",
            MessageKind::Error => "ERROR",
            MessageKind::Success => "SUCCESS",
        }
    }

    fn color(self) -> &'static str {
        match self {
            MessageKind::Info => "\x1b[1;36m",
            MessageKind::Warn => "\x1b[1;33m",
            MessageKind::Error => "\x1b[1;31m",
            MessageKind::Success => "\x1b[1;32m",
        }
    }
}

const COLOR_RESET: &str = "\x1b[0m";

/// `[TAG] title` followed by tab-separated details when there are any.
pub fn format_message(kind: MessageKind, title: &str, details: &str) -> String {
    let mut line = format!("{}[{}]{} {}", kind.color(), kind.tag(), COLOR_RESET, title);
    if !details.is_empty() {
        line.push('\t');
        line.push_str(details);
    }
    line
}

pub fn print_message(kind: MessageKind, title: &str, details: &str) {
    println!("{}", format_message(kind, title, details));
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr) => {
        $crate::cli_messages::print_message($crate::cli_messages::MessageKind::Info, $title, "")
    };
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message(
            $crate::cli_messages::MessageKind::Info,
            $title,
            &format!($($details)*),
        )
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message(
            $crate::cli_messages::MessageKind::Warn,
            $title,
            &format!($($details)*),
        )
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message(
            $crate::cli_messages::MessageKind::Error,
            $title,
            &format!($($details)*),
        )
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr) => {
        $crate::cli_messages::print_message($crate::cli_messages::MessageKind::Success, $title, "")
    };
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message(
            $crate::cli_messages::MessageKind::Success,
            $title,
            &format!($($details)*),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_are_optional() {
        let line = format_message(MessageKind::Success, "Lead saved.", "");
        assert!(line.ends_with("[SUCCESS]\x1b[0m Lead saved."));

        let line = format_message(MessageKind::Warn, "Config", "using defaults");
        assert!(line.ends_with("Config\tusing defaults"));
    }
}
