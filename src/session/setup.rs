//! Session setup and initialization

use crate::client::{CustomerDataClient, DemoDataClient, HttpDataClient};
use crate::config::{Config, DataSource};
use crate::dashboard::SalesDashboardViewModel;
use crate::environment::Environment;
use crate::messaging::{MessageBus, Subscription};
use log::info;
use std::error::Error;
use std::sync::Arc;

/// Session data shared by the TUI, headless mode and one-shot commands
pub struct SessionData {
    /// The dashboard view-model
    pub view_model: Arc<SalesDashboardViewModel>,
    /// Client the view-model reads from; commands save through it too
    pub client: Arc<dyn CustomerDataClient>,
    /// Bus carrying saved accounts to the view-model
    pub bus: MessageBus,
    /// Keeps the view-model subscribed to saved accounts
    pub subscription: Subscription,
    /// Configuration the session was built from
    pub config: Config,
    /// Human-readable name of the data source
    pub source: String,
}

/// Build the data client selected by `config`.
pub fn build_client(
    config: &Config,
    env: Environment,
) -> Result<(Arc<dyn CustomerDataClient>, String), Box<dyn Error>> {
    match config.data_source {
        DataSource::Demo => Ok((
            Arc::new(DemoDataClient::new(config.demo_seed)),
            "demo data".to_string(),
        )),
        DataSource::Remote => {
            let client = HttpDataClient::new(env)?;
            let source = format!("{} CRM", client.environment());
            Ok((Arc::new(client), source))
        }
    }
}

/// Sets up a dashboard session
///
/// This function handles all the common setup required by every mode:
/// 1. Creates the data client
/// 2. Creates the view-model with the configured currency format
/// 3. Subscribes the view-model to saved accounts on a fresh bus
///
/// Must be called from within the tokio runtime.
pub fn setup_session(config: Config, env: Environment) -> Result<SessionData, Box<dyn Error>> {
    let (client, source) = build_client(&config, env)?;
    info!("Using {}", source);

    let view_model = Arc::new(SalesDashboardViewModel::new(
        Arc::clone(&client),
        config.currency(),
    ));
    let bus = MessageBus::default();
    let subscription = view_model.subscribe_to_saved_accounts(&bus);

    Ok(SessionData {
        view_model,
        client,
        bus,
        subscription,
        config,
        source,
    })
}
