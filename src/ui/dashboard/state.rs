//! Dashboard state management
//!
//! Holds what the renderer draws: a snapshot of the view-model taken once per
//! frame plus the activity log.

use crate::consts::dashboard_consts::MAX_ACTIVITY_LOGS;
use crate::dashboard::{ReloadPhase, SalesDashboardViewModel};
use crate::error_classifier::LogLevel;
use crate::events::{CommandKind, ViewModelEvent};
use crate::models::{Account, ChartDataPoint};
use crate::ui::app::UIConfig;
use chrono::Local;
use std::collections::VecDeque;
use std::time::Instant;

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub message: String,
    pub level: LogLevel,
}

impl ActivityEntry {
    pub fn new(message: impl Into<String>, level: LogLevel) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            message: message.into(),
            level,
        }
    }
}

impl From<&ViewModelEvent> for ActivityEntry {
    fn from(event: &ViewModelEvent) -> Self {
        let message = event.to_string();
        // Display prefixes the timestamp; keep only the description.
        let message = match message.split_once("] ") {
            Some((_, rest)) => rest.to_string(),
            None => message,
        };
        Self {
            timestamp: event.timestamp.clone(),
            message,
            level: event.log_level(),
        }
    }
}

/// View-model values read for the current frame.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub leads: Vec<Account>,
    pub chart_points: Vec<ChartDataPoint>,
    pub sales_average: String,
    pub order_count: usize,
    pub phase: Option<ReloadPhase>,
    pub is_model_loaded: bool,
    pub can_load_dashboard: bool,
    pub can_load_leads: bool,
}

#[derive(Debug)]
pub struct DashboardState {
    pub title: String,
    /// Where the data comes from, e.g. "demo data".
    pub source: String,
    pub start_time: Instant,
    pub snapshot: DashboardSnapshot,
    /// Activity logs for display (last `MAX_ACTIVITY_LOGS` entries)
    pub activity_logs: VecDeque<ActivityEntry>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(title: &str, source: &str, start_time: Instant, ui_config: UIConfig) -> Self {
        Self {
            title: title.to_string(),
            source: source.to_string(),
            start_time,
            snapshot: DashboardSnapshot::default(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
        }
    }

    /// Advance the animation and re-read the view-model.
    pub fn update(&mut self, view_model: &SalesDashboardViewModel) {
        self.tick = self.tick.wrapping_add(1);
        let phase = view_model.reload_phase();
        self.snapshot = DashboardSnapshot {
            leads: view_model.leads(),
            chart_points: view_model.chart_points(),
            sales_average: view_model.sales_average(),
            order_count: view_model.orders().len(),
            phase: (phase != ReloadPhase::Idle).then_some(phase),
            is_model_loaded: view_model.is_model_loaded(),
            can_load_dashboard: view_model.can_execute(CommandKind::LoadDashboard),
            can_load_leads: view_model.can_execute(CommandKind::LoadLeads),
        };
    }

    /// Add an entry to activity logs with size limit
    pub fn add_to_activity_log(&mut self, entry: ActivityEntry) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Property;

    fn state() -> DashboardState {
        DashboardState::new("Sales Dashboard", "demo data", Instant::now(), UIConfig::new(false))
    }

    #[test]
    fn test_activity_log_is_bounded() {
        let mut state = state();
        for i in 0..MAX_ACTIVITY_LOGS + 5 {
            state.add_to_activity_log(ActivityEntry::new(format!("entry {}", i), LogLevel::Info));
        }
        assert_eq!(state.activity_logs.len(), MAX_ACTIVITY_LOGS);
        assert_eq!(state.activity_logs.front().unwrap().message, "entry 5");
    }

    #[test]
    fn test_entry_from_event_drops_timestamp_prefix() {
        let event = ViewModelEvent::property_changed(Property::Leads);
        let entry = ActivityEntry::from(&event);
        assert_eq!(entry.message, "Leads changed");
        assert_eq!(entry.timestamp, event.timestamp);
        assert_eq!(entry.level, LogLevel::Info);
    }
}
