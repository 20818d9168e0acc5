use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use markwarden::config::AppConfig;
use markwarden::error::AppError;
use markwarden::notify::{self, LoggingTransport};
use markwarden::portfolio::store::seed_sample;
use markwarden::portfolio::{
    renewals, JsonFileStore, PortfolioReport, PortfolioRepository, Territory, TrademarkDraft,
    REPORT_HORIZON_DAYS,
};
use markwarden::telemetry;

use crate::render;

#[derive(Parser, Debug)]
#[command(
    name = "markwarden",
    about = "Track trademark renewal deadlines and licensing territory coverage",
    version
)]
struct Cli {
    /// Analysis date (YYYY-MM-DD); defaults to today
    #[arg(long, global = true, value_parser = parse_date)]
    as_of: Option<NaiveDate>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the full portfolio report (default command)
    Report,
    /// List renewals due within the horizon
    Upcoming(UpcomingArgs),
    /// Add a trademark record to the portfolio
    Add(AddArgs),
    /// Print territory coverage and licensing conflicts
    Coverage,
    /// Write the iCalendar reminder feed
    Calendar(CalendarArgs),
    /// Render renewal and overdue alert emails and hand them to the transport
    Notify(NotifyArgs),
    /// Write sample portfolio and licensing fixtures
    Seed,
}

#[derive(Args, Debug)]
struct UpcomingArgs {
    /// Horizon in days
    #[arg(long, default_value_t = REPORT_HORIZON_DAYS)]
    days: i64,
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    jurisdiction: String,
    /// Filing date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    filing_date: NaiveDate,
    /// Renewal deadline (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    renewal_date: NaiveDate,
    #[arg(long)]
    registration_number: Option<String>,
}

#[derive(Args, Debug)]
struct CalendarArgs {
    /// Output path for the .ics feed
    #[arg(long, default_value = "trademark_deadlines.ics")]
    output: PathBuf,
    /// Also write a markdown setup guide with Google Calendar quick-add links
    #[arg(long, value_name = "PATH")]
    setup_guide: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct NotifyArgs {
    /// Horizon for renewal alerts, in days
    #[arg(long, default_value_t = REPORT_HORIZON_DAYS)]
    days: i64,
    /// Also send the weekly portfolio report
    #[arg(long)]
    weekly: bool,
    /// Print rendered HTML bodies instead of delivering
    #[arg(long)]
    dry_run: bool,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());
    let store = JsonFileStore::new(
        &config.storage.trademarks_path,
        &config.storage.agreements_path,
    );

    match cli.command.unwrap_or(Command::Report) {
        Command::Report => {
            let trademarks = store.load_trademarks()?;
            let agreements = store.load_agreements()?;
            let report = PortfolioReport::build(&trademarks, &agreements, as_of);
            render::render_portfolio_summary(&report.summary(config.analysis.filing_cost));
        }
        Command::Upcoming(args) => {
            let trademarks = store.load_trademarks()?;
            let alerts = renewals::classify(&trademarks, as_of, args.days);
            if alerts.is_empty() {
                println!("No renewals due within {} days", args.days);
            }
            for alert in &alerts {
                println!(
                    "{} ({}) - {} days",
                    alert.trademark.name,
                    alert.trademark.jurisdiction.display_name(),
                    alert.days_until
                );
            }
        }
        Command::Add(args) => {
            let record = store.append_trademark(TrademarkDraft {
                name: args.name,
                jurisdiction: Territory::new(&args.jurisdiction)?,
                filing_date: args.filing_date,
                renewal_date: args.renewal_date,
                registration_number: args.registration_number,
            })?;
            println!(
                "Added: {} ({}) as #{}",
                record.name,
                record.jurisdiction.display_name(),
                record.id
            );
        }
        Command::Coverage => {
            let trademarks = store.load_trademarks()?;
            let agreements = store.load_agreements()?;
            let report = PortfolioReport::build(&trademarks, &agreements, as_of);
            render::render_coverage_summary(
                &report.summary(config.analysis.filing_cost).coverage,
            );
        }
        Command::Calendar(args) => {
            let trademarks = store.load_trademarks()?;
            let feed = notify::render_feed(
                &trademarks,
                Local::now().naive_utc(),
                &config.calendar,
            );
            fs::write(&args.output, feed)?;
            println!("Calendar feed written to {}", args.output.display());

            if let Some(guide_path) = &args.setup_guide {
                fs::write(guide_path, notify::render_setup_guide(&trademarks))?;
                println!("Setup guide written to {}", guide_path.display());
            }
        }
        Command::Notify(args) => {
            let trademarks = store.load_trademarks()?;
            let recipients = &config.email.recipients;

            let mut messages = Vec::new();
            for alert in renewals::classify(&trademarks, as_of, args.days) {
                messages.push(notify::renewal_alert_email(&alert, recipients));
            }
            for alert in renewals::overdue(&trademarks, as_of) {
                messages.push(notify::overdue_alert_email(&alert, recipients));
            }
            if args.weekly {
                let agreements = store.load_agreements()?;
                let report = PortfolioReport::build(&trademarks, &agreements, as_of);
                messages.push(notify::weekly_report_email(
                    &report.summary(config.analysis.filing_cost),
                    recipients,
                ));
            }

            if args.dry_run {
                for message in &messages {
                    println!("Subject: {}", message.subject);
                    println!("{}", message.html_body);
                }
                return Ok(());
            }

            let summary = notify::dispatch(&LoggingTransport, &messages);
            info!(
                delivered = summary.delivered,
                failed = summary.failed,
                "alert batch finished"
            );
            println!(
                "Alerts: {} delivered, {} failed",
                summary.delivered, summary.failed
            );
        }
        Command::Seed => {
            seed_sample(&store)?;
            println!(
                "Sample data written to {} and {}",
                config.storage.trademarks_path.display(),
                config.storage.agreements_path.display()
            );
        }
    }

    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
