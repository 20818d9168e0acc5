use chrono::NaiveDate;

use super::super::coverage::{self, CoverageReport, TerritoryConflict};
use super::super::domain::{LicensingAgreement, Trademark, TrademarkStatus};
use super::super::renewals::{self, OverdueAlert, RenewalAlert};
use super::views::{
    ConflictView, CoverageSummaryView, OverdueAlertView, PortfolioSummary, RenewalAlertView,
    StatusCountEntry,
};

/// Default horizon for the "upcoming" section of the report.
pub const REPORT_HORIZON_DAYS: i64 = 90;

/// One portfolio analysis run: renewal classification at the standard
/// horizons plus the territory coverage picture, all computed against a
/// single `as_of` snapshot.
#[derive(Debug)]
pub struct PortfolioReport {
    pub as_of: NaiveDate,
    pub total_active: usize,
    pub status_counts: [(TrademarkStatus, usize); 3],
    pub due_within_30: usize,
    pub due_within_60: usize,
    pub upcoming: Vec<RenewalAlert>,
    pub overdue: Vec<OverdueAlert>,
    pub coverage: CoverageReport,
}

impl PortfolioReport {
    pub fn build(
        trademarks: &[Trademark],
        agreements: &[LicensingAgreement],
        as_of: NaiveDate,
    ) -> Self {
        // Each horizon is an independent re-filter; 90 naturally includes
        // everything 60 and 30 would return.
        let upcoming = renewals::classify(trademarks, as_of, REPORT_HORIZON_DAYS);
        let due_within_30 = renewals::classify(trademarks, as_of, 30).len();
        let due_within_60 = renewals::classify(trademarks, as_of, 60).len();
        let overdue = renewals::overdue(trademarks, as_of);
        let coverage = coverage::analyze(trademarks, agreements);

        let count_status = |status: TrademarkStatus| {
            trademarks.iter().filter(|tm| tm.status == status).count()
        };
        let status_counts = [
            (TrademarkStatus::Active, count_status(TrademarkStatus::Active)),
            (
                TrademarkStatus::Pending,
                count_status(TrademarkStatus::Pending),
            ),
            (
                TrademarkStatus::Abandoned,
                count_status(TrademarkStatus::Abandoned),
            ),
        ];

        Self {
            as_of,
            total_active: status_counts[0].1,
            status_counts,
            due_within_30,
            due_within_60,
            upcoming,
            overdue,
            coverage,
        }
    }

    pub fn summary(&self, filing_cost: u32) -> PortfolioSummary {
        let status_counts = self
            .status_counts
            .iter()
            .map(|(status, count)| StatusCountEntry {
                status: *status,
                status_label: status.label(),
                count: *count,
            })
            .collect();

        let upcoming = self.upcoming.iter().map(renewal_alert_view).collect();
        let overdue = self.overdue.iter().map(overdue_alert_view).collect();

        let coverage = CoverageSummaryView {
            licensed_count: self.coverage.licensed_count(),
            protected_count: self.coverage.protected_count(),
            unprotected_count: self.coverage.unprotected_count(),
            unprotected: self
                .coverage
                .unprotected
                .iter()
                .map(|territory| territory.display_name())
                .collect(),
            conflicts: self.coverage.conflicts.iter().map(conflict_view).collect(),
            estimated_filing_cost: self.coverage.estimated_filing_cost(filing_cost),
        };

        PortfolioSummary {
            generated_for: self.as_of,
            total_active: self.total_active,
            status_counts,
            due_within_30: self.due_within_30,
            due_within_60: self.due_within_60,
            due_within_90: self.upcoming.len(),
            upcoming,
            overdue,
            coverage,
        }
    }
}

fn renewal_alert_view(alert: &RenewalAlert) -> RenewalAlertView {
    RenewalAlertView {
        id: alert.trademark.id,
        name: alert.trademark.name.clone(),
        jurisdiction: alert.trademark.jurisdiction.display_name(),
        renewal_date: alert.trademark.renewal_date,
        days_until: alert.days_until,
        tier: alert.tier,
        tier_label: alert.tier.label(),
        registration_number: alert.trademark.registration_number.clone(),
    }
}

fn overdue_alert_view(alert: &OverdueAlert) -> OverdueAlertView {
    OverdueAlertView {
        id: alert.trademark.id,
        name: alert.trademark.name.clone(),
        jurisdiction: alert.trademark.jurisdiction.display_name(),
        renewal_date: alert.trademark.renewal_date,
        days_overdue: alert.days_overdue,
    }
}

fn conflict_view(conflict: &TerritoryConflict) -> ConflictView {
    ConflictView {
        trademark_name: conflict.trademark_name.clone(),
        territory: conflict.jurisdiction.display_name(),
        licensee: conflict.licensee.clone(),
        agreement_id: conflict.agreement_id,
        risk_level: conflict.risk_level,
        risk_label: conflict.risk_level.label(),
        recommended_action: conflict.recommended_action.clone(),
    }
}
