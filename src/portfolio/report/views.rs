use chrono::NaiveDate;
use serde::Serialize;

use super::super::domain::{RiskLevel, TrademarkStatus};
use super::super::renewals::AlertTier;

#[derive(Debug, Clone, Serialize)]
pub struct RenewalAlertView {
    pub id: u64,
    pub name: String,
    pub jurisdiction: String,
    pub renewal_date: NaiveDate,
    pub days_until: i64,
    pub tier: AlertTier,
    pub tier_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverdueAlertView {
    pub id: u64,
    pub name: String,
    pub jurisdiction: String,
    pub renewal_date: NaiveDate,
    pub days_overdue: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConflictView {
    pub trademark_name: String,
    pub territory: String,
    pub licensee: String,
    pub agreement_id: u64,
    pub risk_level: RiskLevel,
    pub risk_label: &'static str,
    pub recommended_action: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageSummaryView {
    pub licensed_count: usize,
    pub protected_count: usize,
    pub unprotected_count: usize,
    pub unprotected: Vec<String>,
    pub conflicts: Vec<ConflictView>,
    pub estimated_filing_cost: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCountEntry {
    pub status: TrademarkStatus,
    pub status_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub generated_for: NaiveDate,
    pub total_active: usize,
    pub status_counts: Vec<StatusCountEntry>,
    pub due_within_30: usize,
    pub due_within_60: usize,
    pub due_within_90: usize,
    pub upcoming: Vec<RenewalAlertView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overdue: Vec<OverdueAlertView>,
    pub coverage: CoverageSummaryView,
}
