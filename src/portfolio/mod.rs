pub mod coverage;
pub mod domain;
pub mod renewals;
pub mod report;
pub mod store;

pub use coverage::{CoverageReport, TerritoryConflict};
pub use domain::{
    AgreementStatus, LicensingAgreement, PortfolioError, RiskLevel, Territory, Trademark,
    TrademarkStatus,
};
pub use renewals::{AlertTier, OverdueAlert, RenewalAlert, RenewalStanding, TrademarkStanding};
pub use report::{PortfolioReport, REPORT_HORIZON_DAYS};
pub use store::{JsonFileStore, PortfolioRepository, StoreError, TrademarkDraft};
