use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the CRM deployments the dashboard can read from.
#[derive(Clone, Default, Copy, PartialEq, Eq)]
pub enum Environment {
    /// CRM service running on the developer's machine.
    Local,
    /// Staging service with sample tenants.
    Staging,
    /// Production CRM service.
    #[default]
    Production,
}

impl Environment {
    /// Returns the CRM service URL associated with the environment.
    pub fn crm_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:5080".to_string(),
            Environment::Staging => "https://staging.crm.sales-dashboard.dev".to_string(),
            Environment::Production => "https://crm.sales-dashboard.dev".to_string(),
        }
    }

    /// Reads the environment from `SALES_DASHBOARD_ENVIRONMENT`, defaulting to production.
    pub fn from_env() -> Self {
        std::env::var(crate::consts::dashboard_consts::ENVIRONMENT_VAR)
            .unwrap_or_default()
            .parse::<Environment>()
            .unwrap_or_default()
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Staging => write!(f, "Staging"),
            Environment::Production => write!(f, "Production"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.crm_url())
    }
}
