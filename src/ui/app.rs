//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::client::CustomerDataClient;
use crate::dashboard::{ReloadOutcome, SalesDashboardViewModel};
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{CommandKind, ViewModelEvent};
use crate::messaging::{BusMessage, MessageBus};
use crate::models::Account;
use crate::ui::dashboard::{ActivityEntry, DashboardState, render_dashboard};
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Terminal, backend::Backend};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::sync::mpsc;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
}

impl UIConfig {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            with_background_color,
        }
    }
}

/// Application state
pub struct App {
    view_model: Arc<SalesDashboardViewModel>,

    /// Saves new leads; the bus tells the view-model about them.
    client: Arc<dyn CustomerDataClient>,
    bus: MessageBus,

    /// Property changes from the view-model.
    change_receiver: broadcast::Receiver<ViewModelEvent>,

    /// Results of background commands, shown in the activity log.
    notice_sender: mpsc::UnboundedSender<ActivityEntry>,
    notice_receiver: mpsc::UnboundedReceiver<ActivityEntry>,

    state: DashboardState,

    /// Number of leads created with [N] so far.
    created_leads: usize,
}

impl App {
    pub fn new(
        view_model: Arc<SalesDashboardViewModel>,
        client: Arc<dyn CustomerDataClient>,
        bus: MessageBus,
        source: &str,
        ui_config: UIConfig,
    ) -> Self {
        let (notice_sender, notice_receiver) = mpsc::unbounded_channel();
        let change_receiver = view_model.subscribe_changes();
        let state = DashboardState::new(view_model.title(), source, Instant::now(), ui_config);
        Self {
            view_model,
            client,
            bus,
            change_receiver,
            notice_sender,
            notice_receiver,
            state,
            created_leads: 0,
        }
    }

    /// Start a reload in the background, reporting failures to the activity log.
    fn reload(&self, command: CommandKind) {
        if !self.view_model.can_execute(command) {
            let message = if command == CommandKind::LoadDashboard {
                // Picked up by the UI loop once the running reload ends.
                self.view_model.set_needs_refresh(true);
                format!("{} queued until the current reload ends", command)
            } else {
                format!("{} unavailable while busy", command)
            };
            let _ = self
                .notice_sender
                .send(ActivityEntry::new(message, LogLevel::Info));
            return;
        }
        let view_model = Arc::clone(&self.view_model);
        let notices = self.notice_sender.clone();
        tokio::spawn(async move {
            let result = match command {
                CommandKind::LoadDashboard => view_model.load_dashboard().await,
                CommandKind::LoadLeads => view_model.load_leads().await,
            };
            let entry = match result {
                Ok(ReloadOutcome::Completed) => {
                    ActivityEntry::new(format!("{} finished", command), LogLevel::Info)
                }
                Ok(ReloadOutcome::Skipped) => {
                    ActivityEntry::new(format!("{} skipped", command), LogLevel::Debug)
                }
                Err(e) => ActivityEntry::new(
                    format!("{} failed: {}", command, e),
                    ErrorClassifier::new().classify_reload_error(&e),
                ),
            };
            let _ = notices.send(entry);
        });
    }

    /// Save a generated lead and announce it on the bus.
    fn create_sample_lead(&mut self) {
        self.created_leads += 1;
        let lead = sample_lead(self.created_leads);
        let client = Arc::clone(&self.client);
        let bus = self.bus.clone();
        let notices = self.notice_sender.clone();
        tokio::spawn(async move {
            let entry = match client.save_account(lead).await {
                Ok(saved) => {
                    let message = format!("Saved lead {}", saved.company);
                    bus.publish(BusMessage::AccountSaved(saved));
                    ActivityEntry::new(message, LogLevel::Info)
                }
                Err(e) => ActivityEntry::new(format!("Saving lead failed: {}", e), LogLevel::Error),
            };
            let _ = notices.send(entry);
        });
    }

    /// Move pending view-model events and notices into the activity log.
    fn drain_events(&mut self) {
        loop {
            match self.change_receiver.try_recv() {
                Ok(event) => self.state.add_to_activity_log(ActivityEntry::from(&event)),
                Err(TryRecvError::Lagged(skipped)) => self.state.add_to_activity_log(
                    ActivityEntry::new(format!("{} events not shown", skipped), LogLevel::Warn),
                ),
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        while let Ok(entry) = self.notice_receiver.try_recv() {
            self.state.add_to_activity_log(entry);
        }
    }
}

fn sample_lead(sequence: usize) -> Account {
    Account {
        company: format!("New Prospect {:03}", sequence),
        first_name: "Sam".to_string(),
        last_name: "Rivera".to_string(),
        is_lead: true,
        ..Default::default()
    }
}

/// Runs the application UI in a loop, handling events and rendering the dashboard.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    app.reload(CommandKind::LoadDashboard);

    // UI event loop
    loop {
        if app.view_model.needs_refresh() && app.view_model.can_execute(CommandKind::LoadDashboard)
        {
            app.view_model.set_needs_refresh(false);
            app.reload(CommandKind::LoadDashboard);
        }
        app.drain_events();
        app.state.update(&app.view_model);
        terminal.draw(|f| render_dashboard(f, &app.state))?;

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('r') => app.reload(CommandKind::LoadDashboard),
                    KeyCode::Char('l') => app.reload(CommandKind::LoadLeads),
                    KeyCode::Char('n') => app.create_sample_lead(),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DemoDataClient;
    use crate::currency::CurrencyFormat;
    use chrono::NaiveDate;

    fn app() -> App {
        let client: Arc<dyn CustomerDataClient> = Arc::new(DemoDataClient::with_reference_date(
            7,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        ));
        let view_model = Arc::new(SalesDashboardViewModel::new(
            Arc::clone(&client),
            CurrencyFormat::default(),
        ));
        App::new(view_model, client, MessageBus::default(), "demo data", UIConfig::new(false))
    }

    async fn wait_for_notice(app: &mut App) -> ActivityEntry {
        let entry = tokio::time::timeout(Duration::from_secs(1), app.notice_receiver.recv())
            .await
            .unwrap()
            .unwrap();
        // Put it back so drain_events logs it.
        app.notice_sender.send(entry.clone()).unwrap();
        entry
    }

    #[tokio::test]
    async fn test_reload_key_loads_view_model() {
        let mut app = app();
        app.reload(CommandKind::LoadDashboard);
        let entry = wait_for_notice(&mut app).await;
        assert_eq!(entry.message, "LoadDashboard finished");

        app.drain_events();
        app.state.update(&app.view_model);
        assert!(app.state.snapshot.is_model_loaded);
        assert_eq!(app.state.snapshot.leads.len(), 6);
        assert!(
            app.state
                .activity_logs
                .iter()
                .any(|entry| entry.message == "Leads changed")
        );
    }

    #[tokio::test]
    async fn test_new_lead_reaches_list_through_bus() {
        let mut app = app();
        let _subscription = app.view_model.subscribe_to_saved_accounts(&app.bus);

        app.create_sample_lead();
        let entry = wait_for_notice(&mut app).await;
        assert_eq!(entry.message, "Saved lead New Prospect 001");

        tokio::time::timeout(Duration::from_secs(1), async {
            while app.view_model.leads().is_empty() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
        assert_eq!(app.view_model.leads()[0].company, "New Prospect 001");
    }
}
