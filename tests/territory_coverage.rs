use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use markwarden::portfolio::{
    coverage, AgreementStatus, LicensingAgreement, RiskLevel, Territory, Trademark,
    TrademarkStatus,
};

fn territory(raw: &str) -> Territory {
    Territory::new(raw).expect("valid territory")
}

fn trademark(id: u64, name: &str, jurisdiction: &str, status: TrademarkStatus) -> Trademark {
    let filing = NaiveDate::from_ymd_opt(2020, 1, 15).expect("valid filing date");
    Trademark {
        id,
        name: name.to_string(),
        jurisdiction: territory(jurisdiction),
        filing_date: filing,
        renewal_date: filing + Duration::days(365 * 10),
        status,
        registration_number: None,
    }
}

fn agreement(
    id: u64,
    licensee: &str,
    territories: &[&str],
    status: AgreementStatus,
) -> LicensingAgreement {
    LicensingAgreement {
        id,
        licensee: licensee.to_string(),
        territories: territories.iter().map(|raw| territory(raw)).collect(),
        status,
    }
}

#[test]
fn covered_territory_produces_no_gap() {
    let trademarks = vec![trademark(1, "MARK", "Texas", TrademarkStatus::Active)];
    let agreements = vec![agreement(
        1,
        "Lone Star Goods",
        &["texas"],
        AgreementStatus::Active,
    )];

    let report = coverage::analyze(&trademarks, &agreements);
    assert!(report.unprotected.is_empty());
    assert_eq!(report.licensed_count(), 1);
    assert_eq!(report.protected_count(), 1);
}

#[test]
fn removing_the_trademark_exposes_the_territory() {
    let agreements = vec![agreement(
        1,
        "Lone Star Goods",
        &["texas"],
        AgreementStatus::Active,
    )];

    let report = coverage::analyze(&[], &agreements);
    assert_eq!(
        report.unprotected,
        BTreeSet::from([territory("texas")])
    );
}

#[test]
fn jurisdiction_matching_is_case_insensitive() {
    // "Texas" on the trademark and "texas" in the agreement normalize to the
    // same key at construction time.
    let trademarks = vec![trademark(1, "MARK", "Texas", TrademarkStatus::Active)];
    let agreements = vec![agreement(1, "Licensee", &["TEXAS"], AgreementStatus::Active)];

    let report = coverage::analyze(&trademarks, &agreements);
    assert!(report.unprotected.is_empty());
}

#[test]
fn only_active_agreements_and_trademarks_count() {
    let trademarks = vec![
        trademark(1, "LIVE", "oregon", TrademarkStatus::Active),
        trademark(2, "DEAD", "nevada", TrademarkStatus::Abandoned),
    ];
    let agreements = vec![
        agreement(1, "Active Co", &["oregon", "utah"], AgreementStatus::Active),
        agreement(2, "Expired Co", &["montana"], AgreementStatus::Expired),
        agreement(3, "Pending Co", &["idaho"], AgreementStatus::Pending),
    ];

    let report = coverage::analyze(&trademarks, &agreements);
    assert_eq!(report.licensed, BTreeSet::from([territory("oregon"), territory("utah")]));
    assert_eq!(report.protected, BTreeSet::from([territory("oregon")]));
    assert_eq!(report.unprotected, BTreeSet::from([territory("utah")]));
}

#[test]
fn pending_trademark_in_licensed_territory_yields_one_conflict() {
    let trademarks = vec![trademark(1, "MARK", "Nevada", TrademarkStatus::Pending)];
    let agreements = vec![agreement(
        9,
        "Silver State Retail",
        &["nevada"],
        AgreementStatus::Active,
    )];

    let report = coverage::analyze(&trademarks, &agreements);
    assert_eq!(report.conflicts.len(), 1);
    let conflict = &report.conflicts[0];
    assert_eq!(conflict.trademark_name, "MARK");
    assert_eq!(conflict.agreement_id, 9);
    assert_eq!(conflict.licensee, "Silver State Retail");
    assert_eq!(conflict.risk_level, RiskLevel::High);
    assert!(conflict.recommended_action.contains("Nevada"));
}

#[test]
fn conflict_count_equals_matching_pair_count() {
    let trademarks = vec![
        trademark(1, "ALPHA", "texas", TrademarkStatus::Pending),
        trademark(2, "BETA", "texas", TrademarkStatus::Abandoned),
        trademark(3, "GAMMA", "oregon", TrademarkStatus::Active),
    ];
    let agreements = vec![
        agreement(1, "First", &["texas", "oregon"], AgreementStatus::Active),
        agreement(2, "Second", &["texas"], AgreementStatus::Active),
        agreement(3, "Lapsed", &["texas"], AgreementStatus::Expired),
    ];

    let report = coverage::analyze(&trademarks, &agreements);

    // Exhaustive pair enumeration: each pending-or-abandoned trademark
    // against each active agreement containing its jurisdiction.
    let mut expected = 0;
    for tm in &trademarks {
        if !matches!(
            tm.status,
            TrademarkStatus::Pending | TrademarkStatus::Abandoned
        ) {
            continue;
        }
        for agreement in &agreements {
            if agreement.status == AgreementStatus::Active
                && agreement.territories.contains(&tm.jurisdiction)
            {
                expected += 1;
            }
        }
    }

    assert_eq!(expected, 4);
    assert_eq!(report.conflicts.len(), expected);

    // No deduplication: ALPHA conflicts with both active agreements.
    let alpha_conflicts = report
        .conflicts
        .iter()
        .filter(|conflict| conflict.trademark_name == "ALPHA")
        .count();
    assert_eq!(alpha_conflicts, 2);
}

#[test]
fn analyze_is_idempotent_and_pure() {
    let trademarks = vec![
        trademark(1, "MARK", "texas", TrademarkStatus::Active),
        trademark(2, "OTHER", "utah", TrademarkStatus::Pending),
    ];
    let agreements = vec![agreement(
        1,
        "Licensee",
        &["texas", "utah", "idaho"],
        AgreementStatus::Active,
    )];

    let first = coverage::analyze(&trademarks, &agreements);
    let second = coverage::analyze(&trademarks, &agreements);
    assert_eq!(first, second);
}

#[test]
fn no_agreements_means_no_gaps_or_conflicts() {
    let trademarks = vec![trademark(1, "MARK", "texas", TrademarkStatus::Pending)];

    let report = coverage::analyze(&trademarks, &[]);
    assert!(report.licensed.is_empty());
    assert!(report.unprotected.is_empty());
    assert!(report.conflicts.is_empty());
}

#[test]
fn filing_cost_scales_with_gap_count() {
    let agreements = vec![agreement(
        1,
        "Licensee",
        &["texas", "utah", "idaho"],
        AgreementStatus::Active,
    )];

    let report = coverage::analyze(&[], &agreements);
    assert_eq!(report.unprotected_count(), 3);
    assert_eq!(report.estimated_filing_cost(3_900), 11_700);
    assert_eq!(report.estimated_filing_cost(0), 0);
}

#[test]
fn territory_normalization_collapses_formatting_drift() {
    assert_eq!(territory(" Texas "), territory("texas"));
    assert_eq!(territory("NEW   MEXICO"), territory("new mexico"));
    assert_eq!(territory("new mexico").display_name(), "New Mexico");
    assert!(Territory::new("   ").is_err());
}
