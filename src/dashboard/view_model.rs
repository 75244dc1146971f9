//! Sales dashboard view-model
//!
//! Drives the two guarded reloads (full dashboard, leads only), keeps the
//! lead list de-duplicated and ordered by company as saved accounts arrive
//! on the message bus, and publishes a change event for every property it
//! reassigns.

use super::chart::{ChartHelper, sales_average};
use super::leads::{sort_by_company, upsert_sorted};
use super::reload::{ReloadGuard, ReloadOutcome, ReloadPhase, ReloadState};
use crate::client::CustomerDataClient;
use crate::client::error::DataClientError;
use crate::consts::dashboard_consts::{CHANGE_QUEUE_SIZE, DASHBOARD_TITLE};
use crate::currency::CurrencyFormat;
use crate::error_classifier::ErrorClassifier;
use crate::events::{CommandKind, Property, ViewModelEvent};
use crate::messaging::{BusMessage, MessageBus, Subscription};
use crate::models::{Account, ChartDataPoint, Order};
use log::{debug, info, log};
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct DashboardProperties {
    orders: Vec<Order>,
    leads: Vec<Account>,
    chart_points: Vec<ChartDataPoint>,
    sales_average: String,
}

pub struct SalesDashboardViewModel {
    client: Arc<dyn CustomerDataClient>,
    currency: CurrencyFormat,
    reload: ReloadState,
    data_seeded: AtomicBool,
    model_loaded: AtomicBool,
    needs_refresh: AtomicBool,
    properties: Mutex<DashboardProperties>,
    changes: broadcast::Sender<ViewModelEvent>,
}

impl SalesDashboardViewModel {
    pub fn new(client: Arc<dyn CustomerDataClient>, currency: CurrencyFormat) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_QUEUE_SIZE);
        let properties = DashboardProperties {
            sales_average: currency.format(0.0),
            ..Default::default()
        };
        Self {
            client,
            currency,
            reload: ReloadState::new(),
            data_seeded: AtomicBool::new(false),
            model_loaded: AtomicBool::new(false),
            needs_refresh: AtomicBool::new(false),
            properties: Mutex::new(properties),
            changes,
        }
    }

    pub fn title(&self) -> &str {
        DASHBOARD_TITLE
    }

    /// Receive a [`ViewModelEvent`] for every property reassignment and
    /// command availability change from now on.
    pub fn subscribe_changes(&self) -> broadcast::Receiver<ViewModelEvent> {
        self.changes.subscribe()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.properties().orders.clone()
    }

    pub fn leads(&self) -> Vec<Account> {
        self.properties().leads.clone()
    }

    pub fn chart_points(&self) -> Vec<ChartDataPoint> {
        self.properties().chart_points.clone()
    }

    /// Mean chart value as currency text.
    pub fn sales_average(&self) -> String {
        self.properties().sales_average.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.reload.is_busy()
    }

    pub fn reload_phase(&self) -> ReloadPhase {
        self.reload.phase()
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model_loaded.load(Ordering::Acquire)
    }

    pub fn is_data_seeded(&self) -> bool {
        self.data_seeded.load(Ordering::Acquire)
    }

    /// Set by hosts that want the next visit to reload the dashboard.
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh.load(Ordering::Acquire)
    }

    pub fn set_needs_refresh(&self, value: bool) {
        self.needs_refresh.store(value, Ordering::Release);
    }

    /// Both commands are available exactly when no reload is running.
    pub fn can_execute(&self, _command: CommandKind) -> bool {
        !self.is_busy()
    }

    /// Full reload: seed once, then fetch orders and leads and rebuild the chart.
    ///
    /// Returns [`ReloadOutcome::Skipped`] without touching anything if a
    /// reload of either kind is already running. On a client error the busy
    /// state is still released and the model stays not-loaded.
    pub async fn load_dashboard(&self) -> Result<ReloadOutcome, DataClientError> {
        let Some(scope) = self.begin(CommandKind::LoadDashboard) else {
            debug!("Dashboard reload skipped: {} in progress", self.reload.phase());
            return Ok(ReloadOutcome::Skipped);
        };
        self.set_model_loaded(false);

        let result = self.reload_dashboard().await;

        drop(scope);
        result.map(|_| ReloadOutcome::Completed)
    }

    async fn reload_dashboard(&self) -> Result<(), DataClientError> {
        if !self.is_data_seeded() {
            self.client.seed_data().await?;
            self.data_seeded.store(true, Ordering::Release);
            info!("Demo data seeded");
        }

        let orders = self.client.get_all_account_orders().await?;
        self.set_orders(orders);

        let mut leads = self.client.get_accounts(true).await?;
        sort_by_company(&mut leads);
        self.set_leads(leads);

        let chart_points = ChartHelper::new(&self.properties().orders, false).chart_points();
        let average = sales_average(&chart_points).unwrap_or(0.0);
        let average_text = self.currency.format(average);
        info!(
            "Dashboard loaded: {} chart points, sales average {}",
            chart_points.len(),
            average_text
        );
        self.set_chart_points(chart_points);
        self.set_sales_average(average_text);

        self.set_model_loaded(true);
        Ok(())
    }

    /// Leads-only refresh used by pull-to-refresh.
    ///
    /// Shares the busy state with [`Self::load_dashboard`]; command
    /// availability is re-announced when it starts and when it ends.
    pub async fn load_leads(&self) -> Result<ReloadOutcome, DataClientError> {
        let Some(scope) = self.begin(CommandKind::LoadLeads) else {
            debug!("Leads reload skipped: {} in progress", self.reload.phase());
            return Ok(ReloadOutcome::Skipped);
        };
        self.set_model_loaded(false);

        self.set_leads(Vec::new());
        let result = self.client.get_accounts(true).await.map(|mut leads| {
            sort_by_company(&mut leads);
            debug!("Fetched {} leads", leads.len());
            self.set_leads(leads);
            self.set_model_loaded(true);
        });

        drop(scope);
        result.map(|_| ReloadOutcome::Completed)
    }

    /// Upsert a saved account into the lead list and re-sort it by company.
    ///
    /// Runs in any reload state; the list is replaced wholesale, which
    /// produces one `Leads` change.
    pub fn on_account_saved(&self, account: Account) {
        {
            let mut properties = self.properties();
            let leads = std::mem::take(&mut properties.leads);
            properties.leads = upsert_sorted(leads, account);
        }
        self.notify(Property::Leads);
    }

    /// Deliver `AccountSaved` bus messages to [`Self::on_account_saved`].
    ///
    /// The subscription holds only a weak reference; it ends on its own
    /// once the view-model is gone, or earlier when the handle is dropped.
    pub fn subscribe_to_saved_accounts(self: &Arc<Self>, bus: &MessageBus) -> Subscription {
        let view_model = Arc::downgrade(self);
        bus.subscribe(move |message| {
            let Some(view_model) = view_model.upgrade() else {
                return ControlFlow::Break(());
            };
            match message {
                BusMessage::AccountSaved(account) => view_model.on_account_saved(account),
            }
            ControlFlow::Continue(())
        })
    }

    /// Fire-and-forget full reload. Returns `None` when the command is unavailable.
    pub fn execute_load_dashboard(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.can_execute(CommandKind::LoadDashboard) {
            return None;
        }
        let view_model = Arc::clone(self);
        Some(tokio::spawn(async move {
            if let Err(e) = view_model.load_dashboard().await {
                log_reload_error(CommandKind::LoadDashboard, &e);
            }
        }))
    }

    /// Fire-and-forget leads reload. Returns `None` when the command is unavailable.
    pub fn execute_load_leads(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.can_execute(CommandKind::LoadLeads) {
            return None;
        }
        let view_model = Arc::clone(self);
        Some(tokio::spawn(async move {
            if let Err(e) = view_model.load_leads().await {
                log_reload_error(CommandKind::LoadLeads, &e);
            }
        }))
    }

    /// Claim the reload slot for `command` and announce the busy state.
    fn begin(&self, command: CommandKind) -> Option<BusyScope<'_>> {
        let phase = match command {
            CommandKind::LoadDashboard => ReloadPhase::LoadingDashboard,
            CommandKind::LoadLeads => ReloadPhase::LoadingLeads,
        };
        let guard = self.reload.try_begin(phase)?;
        self.notify(Property::IsBusy);
        if command == CommandKind::LoadLeads {
            self.notify_can_execute(command);
        }
        Some(BusyScope {
            view_model: self,
            command,
            guard: Some(guard),
        })
    }

    fn properties(&self) -> MutexGuard<'_, DashboardProperties> {
        // Property writes are plain assignments, so a poisoned lock still
        // holds consistent values.
        self.properties
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_orders(&self, orders: Vec<Order>) {
        self.properties().orders = orders;
        self.notify(Property::Orders);
    }

    fn set_leads(&self, leads: Vec<Account>) {
        self.properties().leads = leads;
        self.notify(Property::Leads);
    }

    fn set_chart_points(&self, chart_points: Vec<ChartDataPoint>) {
        self.properties().chart_points = chart_points;
        self.notify(Property::SalesChartDataPoints);
    }

    fn set_sales_average(&self, sales_average: String) {
        self.properties().sales_average = sales_average;
        self.notify(Property::SalesAverage);
    }

    fn set_model_loaded(&self, loaded: bool) {
        self.model_loaded.store(loaded, Ordering::Release);
        self.notify(Property::IsModelLoaded);
    }

    fn notify(&self, property: Property) {
        // No observers is fine.
        let _ = self.changes.send(ViewModelEvent::property_changed(property));
    }

    fn notify_can_execute(&self, command: CommandKind) {
        let _ = self.changes.send(ViewModelEvent::can_execute_changed(command));
    }
}

/// A running reload. Dropping it returns the view-model to idle and
/// announces the change, also when the reload future is cancelled.
struct BusyScope<'a> {
    view_model: &'a SalesDashboardViewModel,
    command: CommandKind,
    guard: Option<ReloadGuard<'a>>,
}

impl Drop for BusyScope<'_> {
    fn drop(&mut self) {
        // Observers must see the idle state when the events arrive.
        drop(self.guard.take());
        self.view_model.notify(Property::IsBusy);
        if self.command == CommandKind::LoadLeads {
            self.view_model.notify_can_execute(self.command);
        }
    }
}

fn log_reload_error(command: CommandKind, error: &DataClientError) {
    let level: log::Level = ErrorClassifier::new().classify_reload_error(error).into();
    log!(level, "{} failed: {}", command, error);
}
