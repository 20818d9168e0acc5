//! HTML alert rendering and batch dispatch.
//!
//! Rendering is pure; delivery goes through [`AlertTransport`] so tests and
//! dry runs never touch a network. A failed delivery is logged and the batch
//! continues, because the analysis producing the messages has already
//! succeeded by the time we get here.

use std::fmt::Write as _;
use std::sync::Mutex;

use tracing::{info, warn};

use crate::portfolio::report::views::PortfolioSummary;
use crate::portfolio::{AlertTier, OverdueAlert, RenewalAlert};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePriority {
    Normal,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html_body: String,
    pub priority: MessagePriority,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("mail transport unavailable: {0}")]
    Transport(String),
}

/// Outbound delivery seam; implementations wrap SMTP or any other provider.
pub trait AlertTransport {
    fn deliver(&self, message: &OutboundEmail) -> Result<(), TransportError>;
}

/// Captures messages for assertions and dry runs.
#[derive(Default)]
pub struct InMemoryTransport {
    messages: Mutex<Vec<OutboundEmail>>,
}

impl InMemoryTransport {
    pub fn messages(&self) -> Vec<OutboundEmail> {
        self.messages.lock().expect("transport mutex poisoned").clone()
    }
}

impl AlertTransport for InMemoryTransport {
    fn deliver(&self, message: &OutboundEmail) -> Result<(), TransportError> {
        let mut guard = self.messages.lock().expect("transport mutex poisoned");
        guard.push(message.clone());
        Ok(())
    }
}

/// Logs each message instead of sending it; the CLI default so running the
/// notifier without SMTP credentials stays a no-op.
#[derive(Debug, Default)]
pub struct LoggingTransport;

impl AlertTransport for LoggingTransport {
    fn deliver(&self, message: &OutboundEmail) -> Result<(), TransportError> {
        info!(
            subject = %message.subject,
            recipients = message.to.len(),
            "rendered alert (no transport configured)"
        );
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub delivered: usize,
    pub failed: usize,
}

/// Delivers each message independently. Failures degrade only that message;
/// there are no retries.
pub fn dispatch(transport: &dyn AlertTransport, messages: &[OutboundEmail]) -> DispatchSummary {
    let mut summary = DispatchSummary::default();
    for message in messages {
        match transport.deliver(message) {
            Ok(()) => summary.delivered += 1,
            Err(err) => {
                warn!(subject = %message.subject, error = %err, "alert delivery failed");
                summary.failed += 1;
            }
        }
    }
    summary
}

pub fn renewal_alert_email(alert: &RenewalAlert, recipients: &[String]) -> OutboundEmail {
    let urgent = alert.tier == AlertTier::Urgent;
    let subject = if urgent {
        format!("URGENT: Trademark Renewal - {}", alert.trademark.name)
    } else {
        format!("REMINDER: Trademark Renewal - {}", alert.trademark.name)
    };

    let mut body = String::new();
    body.push_str("<html><body>\n<h2>Trademark Renewal Alert</h2>\n");
    field(&mut body, "Trademark", &alert.trademark.name);
    field(
        &mut body,
        "Jurisdiction",
        &alert.trademark.jurisdiction.display_name(),
    );
    field(
        &mut body,
        "Renewal Date",
        &alert.trademark.renewal_date.to_string(),
    );
    field(&mut body, "Days Until Renewal", &alert.days_until.to_string());
    field(
        &mut body,
        "Registration #",
        alert.trademark.registration_number.as_deref().unwrap_or("N/A"),
    );

    body.push_str("<h3>Action Required:</h3>\n<ul>\n");
    for action in [
        "Review renewal requirements",
        "Prepare filing documents",
        "Budget for renewal fees",
        "Submit to trademark office",
    ] {
        writeln!(body, "<li>{action}</li>").expect("write action item");
    }
    body.push_str("</ul>\n");
    field(
        &mut body,
        "Priority",
        if urgent { "HIGH" } else { "MEDIUM" },
    );
    body.push_str("</body></html>\n");

    OutboundEmail {
        to: recipients.to_vec(),
        subject,
        html_body: body,
        priority: if urgent {
            MessagePriority::High
        } else {
            MessagePriority::Normal
        },
    }
}

pub fn overdue_alert_email(alert: &OverdueAlert, recipients: &[String]) -> OutboundEmail {
    let subject = format!(
        "CRITICAL: Overdue Trademark Renewal - {}",
        alert.trademark.name
    );

    let mut body = String::new();
    body.push_str("<html><body>\n<h2>OVERDUE TRADEMARK RENEWAL</h2>\n");
    field(&mut body, "Trademark", &alert.trademark.name);
    field(
        &mut body,
        "Jurisdiction",
        &alert.trademark.jurisdiction.display_name(),
    );
    field(
        &mut body,
        "Renewal Date",
        &alert.trademark.renewal_date.to_string(),
    );
    field(&mut body, "Days Overdue", &alert.days_overdue.to_string());

    body.push_str("<h3>Immediate Actions Required:</h3>\n<ol>\n");
    for action in [
        "Contact trademark attorney",
        "File emergency renewal",
        "Document late filing reasons",
        "Calculate late fees",
        "Assess risk of abandonment",
    ] {
        writeln!(body, "<li>{action}</li>").expect("write action item");
    }
    body.push_str("</ol>\n");
    body.push_str(
        "<p><strong>Warning:</strong> This trademark may be at risk of abandonment.</p>\n",
    );
    body.push_str("</body></html>\n");

    OutboundEmail {
        to: recipients.to_vec(),
        subject,
        html_body: body,
        priority: MessagePriority::High,
    }
}

pub fn weekly_report_email(summary: &PortfolioSummary, recipients: &[String]) -> OutboundEmail {
    let subject = format!(
        "Weekly Trademark Portfolio Report - {}",
        summary.generated_for
    );

    let mut body = String::new();
    body.push_str("<html><body>\n<h2>Trademark Portfolio - Weekly Report</h2>\n");
    body.push_str("<h3>Portfolio Overview</h3>\n<ul>\n");
    writeln!(body, "<li>Total Active: {}</li>", summary.total_active).expect("write total");
    writeln!(
        body,
        "<li>Renewals Within 90 Days: {}</li>",
        summary.due_within_90
    )
    .expect("write 90-day count");
    writeln!(
        body,
        "<li>Renewals Within 30 Days: {}</li>",
        summary.due_within_30
    )
    .expect("write 30-day count");
    writeln!(body, "<li>Overdue: {}</li>", summary.overdue.len()).expect("write overdue count");
    body.push_str("</ul>\n");

    if summary.upcoming.is_empty() {
        body.push_str("<p>No renewals due in the next 90 days.</p>\n");
    } else {
        body.push_str("<h3>Upcoming Renewals</h3>\n<ul>\n");
        for entry in &summary.upcoming {
            writeln!(
                body,
                "<li>{} ({}) - due {} ({} days, {})</li>",
                escape_html(&entry.name),
                escape_html(&entry.jurisdiction),
                entry.renewal_date,
                entry.days_until,
                entry.tier_label
            )
            .expect("write upcoming entry");
        }
        body.push_str("</ul>\n");
    }

    if !summary.coverage.unprotected.is_empty() {
        body.push_str("<h3>Unprotected Licensed Territories</h3>\n<ul>\n");
        for territory in &summary.coverage.unprotected {
            writeln!(body, "<li>{}</li>", escape_html(territory)).expect("write territory");
        }
        body.push_str("</ul>\n");
        writeln!(
            body,
            "<p>Estimated cost to secure: ${}</p>",
            summary.coverage.estimated_filing_cost
        )
        .expect("write filing cost");
    }

    body.push_str("</body></html>\n");

    OutboundEmail {
        to: recipients.to_vec(),
        subject,
        html_body: body,
        priority: MessagePriority::Normal,
    }
}

fn field(body: &mut String, label: &str, value: &str) {
    writeln!(
        body,
        "<p><strong>{label}:</strong> {}</p>",
        escape_html(value)
    )
    .expect("write field");
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
