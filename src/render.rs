//! Terminal rendering of portfolio views.

use markwarden::portfolio::report::views::{
    CoverageSummaryView, PortfolioSummary, RenewalAlertView,
};

pub(crate) fn render_portfolio_summary(summary: &PortfolioSummary) {
    println!("TRADEMARK PORTFOLIO");
    println!("Generated for: {}", summary.generated_for);

    println!("\nPortfolio counts");
    for entry in &summary.status_counts {
        println!("- {}: {}", entry.status_label, entry.count);
    }

    println!("\nRenewal alerts");
    println!("- Within 30 days: {}", summary.due_within_30);
    println!("- Within 60 days: {}", summary.due_within_60);
    println!("- Within 90 days: {}", summary.due_within_90);

    if summary.overdue.is_empty() {
        println!("\nOverdue renewals: none");
    } else {
        println!("\nOverdue renewals");
        for entry in &summary.overdue {
            println!(
                "- {} ({}), due {} ({} days overdue)",
                entry.name, entry.jurisdiction, entry.renewal_date, entry.days_overdue
            );
        }
    }

    if summary.upcoming.is_empty() {
        println!("\nUpcoming renewals: none within 90 days");
    } else {
        println!("\nUpcoming renewals");
        for entry in &summary.upcoming {
            render_upcoming_entry(entry);
        }
    }

    render_coverage_summary(&summary.coverage);
}

pub(crate) fn render_upcoming_entry(entry: &RenewalAlertView) {
    println!(
        "- [{}] {} ({}) due {} ({} days)",
        entry.tier_label, entry.name, entry.jurisdiction, entry.renewal_date, entry.days_until
    );
}

pub(crate) fn render_coverage_summary(coverage: &CoverageSummaryView) {
    println!("\nTerritory coverage");
    println!("- Licensed territories: {}", coverage.licensed_count);
    println!("- Protected by trademark: {}", coverage.protected_count);
    println!("- Unprotected: {}", coverage.unprotected_count);

    if !coverage.unprotected.is_empty() {
        println!("\nLicensed without trademark protection");
        for territory in &coverage.unprotected {
            println!("- {}", territory);
        }
        println!(
            "Estimated cost to secure: ${}",
            coverage.estimated_filing_cost
        );
    }

    if coverage.conflicts.is_empty() {
        println!("\nLicensing conflicts: none");
    } else {
        println!("\nLicensing conflicts");
        for conflict in &coverage.conflicts {
            println!(
                "- [{}] {} in {} licensed to {} (agreement {})",
                conflict.risk_label,
                conflict.trademark_name,
                conflict.territory,
                conflict.licensee,
                conflict.agreement_id
            );
            println!("  Action: {}", conflict.recommended_action);
        }
    }
}
