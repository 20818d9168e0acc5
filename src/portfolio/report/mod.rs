mod summary;
pub mod views;

pub use summary::{PortfolioReport, REPORT_HORIZON_DAYS};
