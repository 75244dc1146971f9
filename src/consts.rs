pub mod dashboard_consts {
    //! Dashboard Configuration Constants
    //!
    //! Grouped by the part of the dashboard that reads them.

    // =============================================================================
    // VIEW-MODEL
    // =============================================================================

    /// Title shown in the dashboard header.
    pub const DASHBOARD_TITLE: &str = "Sales Dashboard";

    /// Buffer size of the property-change channel. Slow observers that fall
    /// further behind than this see a lag and should re-read all properties.
    pub const CHANGE_QUEUE_SIZE: usize = 64;

    /// chrono format for chart axis labels ("1 Jan").
    pub const CHART_LABEL_FORMAT: &str = "%-d %b";

    // =============================================================================
    // MESSAGE BUS
    // =============================================================================

    /// Number of undelivered bus messages kept per subscriber.
    pub const BUS_CAPACITY: usize = 32;

    /// How long `add-lead` waits for the view-model to apply a saved account.
    pub const SAVE_PROPAGATION_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

    // =============================================================================
    // UI
    // =============================================================================

    /// The maximum number of events to keep in the activity log.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    // =============================================================================
    // CONFIGURATION
    // =============================================================================

    /// Environment variable selecting the CRM deployment.
    pub const ENVIRONMENT_VAR: &str = "SALES_DASHBOARD_ENVIRONMENT";

    /// Directory under `$HOME` holding the config file.
    pub const CONFIG_DIR: &str = ".sales-dashboard";

    /// Config file name.
    pub const CONFIG_FILE: &str = "config.json";

    /// Seconds between automatic reloads in headless mode.
    pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

    /// RNG seed for the demo data set.
    pub const DEFAULT_DEMO_SEED: u64 = 20_240_101;

    // =============================================================================
    // NETWORK
    // =============================================================================

    pub mod http {
        use std::time::Duration;

        /// Connect timeout for CRM requests.
        pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
        /// Overall timeout for CRM requests.
        pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    }
}
