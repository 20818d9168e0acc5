//! Territory coverage analysis: which licensed territories lack trademark
//! protection, and which unfiled marks are being licensed anyway.

use std::collections::BTreeSet;

use serde::Serialize;

use super::domain::{
    AgreementStatus, LicensingAgreement, RiskLevel, Territory, Trademark, TrademarkStatus,
};

/// A licensee operating in a territory where the named trademark is not yet
/// (or no longer) protected. One entry per matching trademark/agreement
/// pair; multiple agreements covering the same territory each get their own
/// conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerritoryConflict {
    pub trademark_name: String,
    pub jurisdiction: Territory,
    pub licensee: String,
    pub agreement_id: u64,
    pub risk_level: RiskLevel,
    pub recommended_action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Union of territories across active agreements.
    pub licensed: BTreeSet<Territory>,
    /// Jurisdictions of active trademarks.
    pub protected: BTreeSet<Territory>,
    /// Licensed territories without active trademark protection.
    pub unprotected: BTreeSet<Territory>,
    pub conflicts: Vec<TerritoryConflict>,
}

impl CoverageReport {
    pub fn licensed_count(&self) -> usize {
        self.licensed.len()
    }

    pub fn protected_count(&self) -> usize {
        self.protected.len()
    }

    pub fn unprotected_count(&self) -> usize {
        self.unprotected.len()
    }

    /// Rough budget to close every coverage gap at a flat per-filing cost.
    pub fn estimated_filing_cost(&self, per_filing: u32) -> u64 {
        self.unprotected.len() as u64 * u64::from(per_filing)
    }
}

/// Pure set analysis over the portfolio and agreement collections. The
/// outputs are `BTreeSet`-backed so iteration order is deterministic without
/// a separate sort step; conflict order follows trademark input order, then
/// agreement input order.
pub fn analyze(trademarks: &[Trademark], agreements: &[LicensingAgreement]) -> CoverageReport {
    let licensed: BTreeSet<Territory> = agreements
        .iter()
        .filter(|agreement| agreement.status == AgreementStatus::Active)
        .flat_map(|agreement| agreement.territories.iter().cloned())
        .collect();

    let protected: BTreeSet<Territory> = trademarks
        .iter()
        .filter(|tm| tm.status == TrademarkStatus::Active)
        .map(|tm| tm.jurisdiction.clone())
        .collect();

    let unprotected: BTreeSet<Territory> = licensed.difference(&protected).cloned().collect();

    let mut conflicts = Vec::new();
    for tm in trademarks {
        if !matches!(
            tm.status,
            TrademarkStatus::Pending | TrademarkStatus::Abandoned
        ) {
            continue;
        }
        for agreement in agreements {
            if agreement.status != AgreementStatus::Active {
                continue;
            }
            if agreement.territories.contains(&tm.jurisdiction) {
                conflicts.push(TerritoryConflict {
                    trademark_name: tm.name.clone(),
                    jurisdiction: tm.jurisdiction.clone(),
                    licensee: agreement.licensee.clone(),
                    agreement_id: agreement.id,
                    risk_level: RiskLevel::High,
                    recommended_action: format!(
                        "File trademark in {} immediately to protect licensed territory",
                        tm.jurisdiction.display_name()
                    ),
                });
            }
        }
    }

    CoverageReport {
        licensed,
        protected,
        unprotected,
        conflicts,
    }
}
