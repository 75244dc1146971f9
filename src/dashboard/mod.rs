pub mod chart;
pub mod leads;
pub mod reload;
pub mod view_model;

pub use reload::{ReloadOutcome, ReloadPhase};
pub use view_model::SalesDashboardViewModel;
