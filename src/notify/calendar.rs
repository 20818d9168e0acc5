//! iCalendar reminder feed for renewal deadlines.
//!
//! The text layout is a compatibility surface: calendar clients already
//! subscribed to the feed expect these exact property lines, so changes here
//! should be treated like wire-format changes.

use std::fmt::Write as _;

use chrono::{NaiveDate, NaiveDateTime};

use crate::portfolio::{Trademark, TrademarkStatus};

/// Reminder events emitted ahead of each renewal deadline, in days.
pub const REMINDER_OFFSETS: [i64; 4] = [90, 60, 30, 7];

#[derive(Debug, Clone)]
pub struct CalendarConfig {
    pub name: String,
    pub timezone: String,
    pub description: String,
    /// Domain suffix for event UIDs.
    pub uid_domain: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            name: "Trademark Deadlines".to_string(),
            timezone: "America/Los_Angeles".to_string(),
            description: "Trademark renewal deadlines".to_string(),
            uid_domain: "markwarden.local".to_string(),
        }
    }
}

/// Render the full feed: one VEVENT per active trademark per reminder
/// offset, plus a deadline-day event. Non-active records emit nothing.
pub fn render_feed(
    trademarks: &[Trademark],
    generated_at: NaiveDateTime,
    config: &CalendarConfig,
) -> String {
    let mut feed = String::new();
    feed.push_str("BEGIN:VCALENDAR\n");
    feed.push_str("VERSION:2.0\n");
    feed.push_str("PRODID:-//Markwarden//Trademark Tracker//EN\n");
    feed.push_str("CALSCALE:GREGORIAN\n");
    feed.push_str("METHOD:PUBLISH\n");
    writeln!(feed, "X-WR-CALNAME:{}", config.name).expect("write calendar name");
    writeln!(feed, "X-WR-TIMEZONE:{}", config.timezone).expect("write timezone");
    writeln!(feed, "X-WR-CALDESC:{}", config.description).expect("write calendar description");

    for tm in trademarks {
        if tm.status != TrademarkStatus::Active {
            continue;
        }

        for days_before in REMINDER_OFFSETS {
            let alert_date = tm.renewal_date - chrono::Duration::days(days_before);
            let label = format!("{days_before}-day reminder");
            push_event(&mut feed, tm, alert_date, &label, generated_at, config);
        }

        push_event(
            &mut feed,
            tm,
            tm.renewal_date,
            "RENEWAL DEADLINE",
            generated_at,
            config,
        );
    }

    feed.push_str("END:VCALENDAR");
    feed
}

/// One pre-filled Google Calendar entry for a renewal deadline.
#[derive(Debug, Clone)]
pub struct QuickAddLink {
    pub trademark: String,
    pub jurisdiction: String,
    pub renewal_date: NaiveDate,
    pub url: String,
}

/// Build a quick-add URL per active trademark, for people who want single
/// deadline entries instead of subscribing to the full feed.
pub fn quick_add_links(trademarks: &[Trademark]) -> Vec<QuickAddLink> {
    trademarks
        .iter()
        .filter(|tm| tm.status == TrademarkStatus::Active)
        .map(|tm| {
            let date = tm.renewal_date.format("%Y%m%d");
            let title = format!(
                "TM Renewal: {} ({})",
                tm.name,
                tm.jurisdiction.display_name()
            );
            let details = format!(
                "Registration: {}",
                tm.registration_number.as_deref().unwrap_or("N/A")
            );
            let url = format!(
                "https://calendar.google.com/calendar/render?action=TEMPLATE&text={title}&dates={date}/{date}&details={details}"
            )
            .replace(' ', "+");

            QuickAddLink {
                trademark: tm.name.clone(),
                jurisdiction: tm.jurisdiction.display_name(),
                renewal_date: tm.renewal_date,
                url,
            }
        })
        .collect()
}

/// Render the markdown setup guide: feed import instructions plus one
/// quick-add section per active trademark.
pub fn render_setup_guide(trademarks: &[Trademark]) -> String {
    let mut guide = String::new();
    guide.push_str("# Trademark Deadline Calendar Setup\n\n");
    guide.push_str("## Option 1: Import the iCal Feed\n\n");
    guide.push_str("1. Generate the feed with `markwarden calendar`.\n");
    guide.push_str("2. Import `trademark_deadlines.ics` into your calendar app:\n");
    guide.push_str("   - **Google Calendar:** Settings > Import & Export > Import\n");
    guide.push_str("   - **Outlook:** File > Open & Export > Import/Export\n");
    guide.push_str("   - **Apple Calendar:** File > Import\n\n");
    guide.push_str("## Option 2: Quick Add to Google Calendar\n\n");
    guide.push_str("Click a link to add an individual deadline:\n\n");

    for link in quick_add_links(trademarks) {
        writeln!(guide, "### {} - {}", link.trademark, link.jurisdiction)
            .expect("write link heading");
        writeln!(guide, "**Renewal Date:** {}\n", link.renewal_date).expect("write renewal date");
        writeln!(guide, "[Add to Google Calendar]({})\n", link.url).expect("write link");
    }

    guide.push_str("## Reminder Schedule\n\n");
    guide.push_str("Each trademark in the feed carries reminders:\n");
    for days_before in REMINDER_OFFSETS {
        writeln!(guide, "- {days_before} days before renewal").expect("write offset line");
    }
    guide.push_str("- On the renewal deadline\n");
    guide
}

fn push_event(
    feed: &mut String,
    tm: &Trademark,
    event_date: NaiveDate,
    event_type: &str,
    generated_at: NaiveDateTime,
    config: &CalendarConfig,
) {
    let uid = format!(
        "{}-{}@{}",
        tm.id,
        event_type.replace(' ', "-"),
        config.uid_domain
    );
    let stamp = generated_at.format("%Y%m%dT%H%M%SZ");
    let summary = format!("TM: {} - {}", tm.name, event_type);

    let registration = tm.registration_number.as_deref().unwrap_or("N/A");
    // Literal \n escapes per RFC 5545 TEXT rules.
    let description = format!(
        "Trademark: {}\\nJurisdiction: {}\\nRenewal Date: {}\\nRegistration: {}\\n\\nAction: Review renewal requirements and prepare filing",
        tm.name,
        tm.jurisdiction.display_name(),
        tm.renewal_date,
        registration
    );

    feed.push_str("BEGIN:VEVENT\n");
    writeln!(feed, "UID:{uid}").expect("write uid");
    writeln!(feed, "DTSTAMP:{stamp}").expect("write dtstamp");
    writeln!(feed, "DTSTART;VALUE=DATE:{}", event_date.format("%Y%m%d")).expect("write dtstart");
    writeln!(feed, "SUMMARY:{summary}").expect("write summary");
    writeln!(feed, "DESCRIPTION:{description}").expect("write description");
    feed.push_str("STATUS:CONFIRMED\n");
    feed.push_str("SEQUENCE:0\n");
    feed.push_str("BEGIN:VALARM\n");
    feed.push_str("TRIGGER:-P1D\n");
    feed.push_str("ACTION:DISPLAY\n");
    feed.push_str("DESCRIPTION:Reminder\n");
    feed.push_str("END:VALARM\n");
    feed.push_str("END:VEVENT\n");
}
