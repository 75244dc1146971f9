mod cli_messages;
mod client;
mod commands;
mod config;
mod consts;
mod currency;
mod dashboard;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod messaging;
mod models;
mod session;
mod ui;

use crate::commands::{NewLead, run_add_lead, run_summary};
use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use log::debug;
use std::error::Error;
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the sales dashboard
    Start {
        /// Run without the terminal UI, reloading periodically and logging events
        #[arg(long, action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Paint a dark background behind the dashboard
        #[arg(long, action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Load the dashboard once and print leads, daily sales and the sales average
    Summary {
        /// Print the summary as JSON
        #[arg(long, action = clap::ArgAction::SetTrue)]
        json: bool,
    },
    /// Save a new lead and print the updated lead list
    AddLead {
        /// Company of the lead
        #[arg(long, value_name = "COMPANY")]
        company: String,

        /// Contact first name
        #[arg(long)]
        first_name: Option<String>,

        /// Contact last name
        #[arg(long)]
        last_name: Option<String>,

        /// Contact email address
        #[arg(long)]
        email: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let environment = Environment::from_env();

    // The TUI owns the terminal; every other mode logs to stderr.
    if !matches!(args.command, Command::Start { headless: false, .. }) {
        logging::init_console_logger();
    }

    let config_path = get_config_path()?;
    let config = load_config(&config_path);
    let session = setup_session(config, environment)?;

    match args.command {
        Command::Start {
            headless,
            with_background,
        } => {
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::Summary { json } => run_summary(session, json).await,
        Command::AddLead {
            company,
            first_name,
            last_name,
            email,
        } => {
            let lead = NewLead {
                company,
                first_name,
                last_name,
                email,
            };
            run_add_lead(session, lead).await
        }
    }
}

/// Read the config file, writing the defaults on first run.
fn load_config(path: &Path) -> Config {
    if !path.exists() {
        let config = Config::default();
        if let Err(e) = config.save(path) {
            debug!("Could not write default config to {}: {}", path.display(), e);
        }
        return config;
    }
    Config::load_or_default(path).unwrap_or_else(|e| {
        print_cmd_warn!(
            "Config file unreadable, using defaults.",
            "{}: {}",
            path.display(),
            e
        );
        Config::default()
    })
}
