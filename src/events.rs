//! Event System
//!
//! Change notifications published by the dashboard view-model to bound views

use crate::error_classifier::LogLevel;
use chrono::Local;
use std::fmt::Display;

/// Observable properties of the sales dashboard.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, strum::Display)]
pub enum Property {
    Orders,
    Leads,
    SalesChartDataPoints,
    SalesAverage,
    IsBusy,
    IsModelLoaded,
}

/// Invokable dashboard commands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, strum::Display)]
pub enum CommandKind {
    /// Full reload, seeding demo data on first run.
    LoadDashboard,
    /// Pull-to-refresh of the lead list.
    LoadLeads,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Change {
    /// A property was reassigned; re-read it.
    PropertyChanged(Property),
    /// Re-evaluate whether a command can run.
    CanExecuteChanged(CommandKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModelEvent {
    pub change: Change,
    pub timestamp: String,
}

impl ViewModelEvent {
    fn new(change: Change) -> Self {
        Self {
            change,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn property_changed(property: Property) -> Self {
        Self::new(Change::PropertyChanged(property))
    }

    pub fn can_execute_changed(command: CommandKind) -> Self {
        Self::new(Change::CanExecuteChanged(command))
    }

    /// Level this event is logged at when printed to the console.
    pub fn log_level(&self) -> LogLevel {
        match self.change {
            Change::PropertyChanged(Property::IsBusy | Property::IsModelLoaded) => LogLevel::Debug,
            Change::PropertyChanged(_) => LogLevel::Info,
            Change::CanExecuteChanged(_) => LogLevel::Trace,
        }
    }
}

impl Display for ViewModelEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.change {
            Change::PropertyChanged(property) => {
                write!(f, "[{}] {} changed", self.timestamp, property)
            }
            Change::CanExecuteChanged(command) => {
                write!(f, "[{}] {} availability changed", self.timestamp, command)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_change() {
        let event = ViewModelEvent::property_changed(Property::SalesAverage);
        assert!(event.to_string().ends_with("SalesAverage changed"));

        let event = ViewModelEvent::can_execute_changed(CommandKind::LoadLeads);
        assert!(event.to_string().ends_with("LoadLeads availability changed"));
    }

    #[test]
    fn test_busy_flags_log_below_collections() {
        let busy = ViewModelEvent::property_changed(Property::IsBusy);
        let leads = ViewModelEvent::property_changed(Property::Leads);
        assert!(busy.log_level() < leads.log_level());
    }
}
