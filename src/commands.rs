//! One-shot dashboard commands: print a summary, add a lead.

use crate::consts::dashboard_consts::SAVE_PROPAGATION_TIMEOUT;
use crate::currency::CurrencyFormat;
use crate::dashboard::{ReloadOutcome, SalesDashboardViewModel};
use crate::events::{Change, Property};
use crate::messaging::BusMessage;
use crate::models::{Account, ChartDataPoint};
use crate::session::SessionData;
use crate::{print_cmd_error, print_cmd_info, print_cmd_success};
use serde::Serialize;
use std::error::Error;
use tokio::sync::broadcast::error::RecvError;

/// Fields of a new lead given on the command line.
#[derive(Debug, Clone, Default)]
pub struct NewLead {
    pub company: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl NewLead {
    fn into_account(self) -> Account {
        Account {
            // The client assigns the id.
            id: String::new(),
            company: self.company,
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            is_lead: true,
            ..Default::default()
        }
    }
}

/// Snapshot of the loaded dashboard, as printed by `summary --json`.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub title: String,
    pub source: String,
    pub order_count: usize,
    pub sales_average: String,
    pub chart_points: Vec<ChartDataPoint>,
    pub leads: Vec<Account>,
}

impl DashboardSummary {
    fn capture(view_model: &SalesDashboardViewModel, source: &str) -> Self {
        Self {
            title: view_model.title().to_string(),
            source: source.to_string(),
            order_count: view_model.orders().len(),
            sales_average: view_model.sales_average(),
            chart_points: view_model.chart_points(),
            leads: view_model.leads(),
        }
    }
}

async fn load(session: &SessionData) -> Result<(), Box<dyn Error>> {
    match session.view_model.load_dashboard().await {
        Ok(ReloadOutcome::Completed) => Ok(()),
        // Nothing else shares this view-model.
        Ok(ReloadOutcome::Skipped) => Err(Box::from("A dashboard reload is already running")),
        Err(e) => {
            print_cmd_error!("Failed to load the dashboard.", "{}", e);
            Err(e.into())
        }
    }
}

/// Load the dashboard once and print it.
pub async fn run_summary(session: SessionData, json: bool) -> Result<(), Box<dyn Error>> {
    load(&session).await?;
    let summary = DashboardSummary::capture(&session.view_model, &session.source);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, &session.config.currency());
    }
    Ok(())
}

/// Load the dashboard, save a new lead, and print the updated lead list.
pub async fn run_add_lead(session: SessionData, lead: NewLead) -> Result<(), Box<dyn Error>> {
    if lead.company.trim().is_empty() {
        return Err(Box::from("Company name must not be empty"));
    }
    load(&session).await?;

    let mut changes = session.view_model.subscribe_changes();
    let saved = session
        .client
        .save_account(lead.into_account())
        .await
        .map_err(|e| {
            print_cmd_error!("Failed to save the lead.", "{}", e);
            e
        })?;
    session.bus.publish(BusMessage::AccountSaved(saved.clone()));

    tokio::time::timeout(SAVE_PROPAGATION_TIMEOUT, async {
        loop {
            match changes.recv().await {
                Ok(event) if event.change == Change::PropertyChanged(Property::Leads) => break,
                Ok(_) | Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    })
    .await
    .map_err(|_| "Timed out waiting for the lead list to update")?;

    print_cmd_success!("Lead saved.", "{} (id {})", saved.company, saved.id);
    print_leads(&session.view_model.leads());
    Ok(())
}

fn print_summary(summary: &DashboardSummary, currency: &CurrencyFormat) {
    print_cmd_info!(&summary.title, "{} orders from {}", summary.order_count, summary.source);
    print_leads(&summary.leads);

    println!("Sales by day ({} points):", summary.chart_points.len());
    for point in &summary.chart_points {
        println!("  {:<8} {:>14}", point.label, currency.format(point.value));
    }
    println!("Sales average: {}", summary.sales_average);
}

fn print_leads(leads: &[Account]) {
    println!("Leads ({}):", leads.len());
    for (index, lead) in leads.iter().enumerate() {
        if lead.display_name() == lead.company {
            println!("  {:>2}. {}", index + 1, lead.company);
        } else {
            println!("  {:>2}. {} ({})", index + 1, lead.company, lead.display_name());
        }
    }
}
