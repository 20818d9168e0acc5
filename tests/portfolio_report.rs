use chrono::{Duration, NaiveDate};
use markwarden::portfolio::{
    AgreementStatus, AlertTier, LicensingAgreement, PortfolioReport, Territory, Trademark,
    TrademarkStatus,
};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid analysis date")
}

fn trademark(
    id: u64,
    name: &str,
    jurisdiction: &str,
    status: TrademarkStatus,
    days_out: i64,
) -> Trademark {
    Trademark {
        id,
        name: name.to_string(),
        jurisdiction: Territory::new(jurisdiction).expect("valid territory"),
        filing_date: as_of() - Duration::days(365),
        renewal_date: as_of() + Duration::days(days_out),
        status,
        registration_number: None,
    }
}

fn fixture() -> (Vec<Trademark>, Vec<LicensingAgreement>) {
    let trademarks = vec![
        trademark(1, "URGENT MARK", "california", TrademarkStatus::Active, 20),
        trademark(2, "WARNING MARK", "oregon", TrademarkStatus::Active, 50),
        trademark(3, "DISTANT MARK", "utah", TrademarkStatus::Active, 80),
        trademark(4, "LATE MARK", "idaho", TrademarkStatus::Active, -10),
        trademark(5, "UNFILED MARK", "arizona", TrademarkStatus::Pending, 200),
    ];
    let agreements = vec![LicensingAgreement {
        id: 1,
        licensee: "Cascade Brands LLC".to_string(),
        territories: ["california", "arizona", "illinois"]
            .iter()
            .map(|raw| Territory::new(raw).expect("valid territory"))
            .collect(),
        status: AgreementStatus::Active,
    }];
    (trademarks, agreements)
}

#[test]
fn report_counts_each_horizon_independently() {
    let (trademarks, agreements) = fixture();
    let report = PortfolioReport::build(&trademarks, &agreements, as_of());

    assert_eq!(report.total_active, 4);
    assert_eq!(report.due_within_30, 1);
    assert_eq!(report.due_within_60, 2);
    assert_eq!(report.upcoming.len(), 3);
    assert_eq!(report.overdue.len(), 1);
}

#[test]
fn summary_views_carry_tier_labels_and_display_names() {
    let (trademarks, agreements) = fixture();
    let summary =
        PortfolioReport::build(&trademarks, &agreements, as_of()).summary(3_900);

    assert_eq!(summary.due_within_90, 3);
    assert_eq!(summary.upcoming[0].name, "URGENT MARK");
    assert_eq!(summary.upcoming[0].tier, AlertTier::Urgent);
    assert_eq!(summary.upcoming[0].tier_label, "Urgent");
    assert_eq!(summary.upcoming[0].jurisdiction, "California");
    assert_eq!(summary.upcoming[1].tier_label, "Warning");
    assert_eq!(summary.upcoming[2].tier_label, "Upcoming");

    assert_eq!(summary.overdue.len(), 1);
    assert_eq!(summary.overdue[0].days_overdue, 10);

    let active = summary
        .status_counts
        .iter()
        .find(|entry| entry.status_label == "Active")
        .expect("active count present");
    assert_eq!(active.count, 4);
}

#[test]
fn summary_coverage_section_reflects_gaps_and_conflicts() {
    let (trademarks, agreements) = fixture();
    let summary =
        PortfolioReport::build(&trademarks, &agreements, as_of()).summary(3_900);

    // california is protected; arizona (pending only) and illinois are not.
    assert_eq!(summary.coverage.licensed_count, 3);
    assert_eq!(summary.coverage.unprotected, vec!["Arizona", "Illinois"]);
    assert_eq!(summary.coverage.estimated_filing_cost, 7_800);

    assert_eq!(summary.coverage.conflicts.len(), 1);
    assert_eq!(summary.coverage.conflicts[0].trademark_name, "UNFILED MARK");
    assert_eq!(summary.coverage.conflicts[0].risk_label, "HIGH");
}

#[test]
fn summary_serializes_for_downstream_consumers() {
    let (trademarks, agreements) = fixture();
    let summary =
        PortfolioReport::build(&trademarks, &agreements, as_of()).summary(3_900);

    let json = serde_json::to_value(&summary).expect("summary serializes");
    assert_eq!(json["total_active"], 4);
    assert_eq!(json["upcoming"][0]["tier"], "urgent");
    assert_eq!(json["coverage"]["unprotected"][0], "Arizona");
}
