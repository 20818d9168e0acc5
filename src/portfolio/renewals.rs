//! Renewal-window classification.
//!
//! Everything here is a pure function of `(trademarks, as_of)`; the current
//! date is always threaded in by the caller so results are reproducible in
//! tests and in scheduled runs alike.

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{Trademark, TrademarkStatus};

/// Presentation severity derived from days-until-renewal. Never persisted,
/// recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertTier {
    Urgent,
    Warning,
    Upcoming,
}

impl AlertTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Warning => "Warning",
            Self::Upcoming => "Upcoming",
        }
    }

    pub const fn for_days_until(days_until: i64) -> Self {
        if days_until <= 30 {
            Self::Urgent
        } else if days_until <= 60 {
            Self::Warning
        } else {
            Self::Upcoming
        }
    }
}

/// Where an active trademark stands relative to its renewal deadline.
///
/// Upcoming and overdue views share this single computation so the report
/// and the notifier cannot drift apart on what counts as overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RenewalStanding {
    Upcoming { days_until: i64 },
    Overdue { days_overdue: i64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct TrademarkStanding {
    pub trademark: Trademark,
    pub standing: RenewalStanding,
}

/// An active trademark whose renewal falls within the requested horizon.
#[derive(Debug, Clone, Serialize)]
pub struct RenewalAlert {
    pub trademark: Trademark,
    pub days_until: i64,
    pub tier: AlertTier,
}

/// An active trademark whose renewal date has already passed.
#[derive(Debug, Clone, Serialize)]
pub struct OverdueAlert {
    pub trademark: Trademark,
    pub days_overdue: i64,
}

/// Compute the renewal standing of every active trademark as of `as_of`.
/// Non-active records never participate in renewal tracking.
pub fn standings(trademarks: &[Trademark], as_of: NaiveDate) -> Vec<TrademarkStanding> {
    trademarks
        .iter()
        .filter(|tm| tm.status == TrademarkStatus::Active)
        .map(|tm| {
            let delta = (tm.renewal_date - as_of).num_days();
            let standing = if delta < 0 {
                RenewalStanding::Overdue {
                    days_overdue: -delta,
                }
            } else {
                RenewalStanding::Upcoming { days_until: delta }
            };
            TrademarkStanding {
                trademark: tm.clone(),
                standing,
            }
        })
        .collect()
}

/// Active trademarks due within `0..=horizon_days` days, ascending by
/// `days_until`. The sort is stable, so records sharing a deadline keep
/// their input order.
pub fn classify(
    trademarks: &[Trademark],
    as_of: NaiveDate,
    horizon_days: i64,
) -> Vec<RenewalAlert> {
    let mut alerts: Vec<RenewalAlert> = standings(trademarks, as_of)
        .into_iter()
        .filter_map(|entry| match entry.standing {
            RenewalStanding::Upcoming { days_until } if days_until <= horizon_days => {
                Some(RenewalAlert {
                    trademark: entry.trademark,
                    days_until,
                    tier: AlertTier::for_days_until(days_until),
                })
            }
            _ => None,
        })
        .collect();
    alerts.sort_by_key(|alert| alert.days_until);
    alerts
}

/// Active trademarks whose renewal deadline has passed, most overdue first.
pub fn overdue(trademarks: &[Trademark], as_of: NaiveDate) -> Vec<OverdueAlert> {
    let mut alerts: Vec<OverdueAlert> = standings(trademarks, as_of)
        .into_iter()
        .filter_map(|entry| match entry.standing {
            RenewalStanding::Overdue { days_overdue } => Some(OverdueAlert {
                trademark: entry.trademark,
                days_overdue,
            }),
            _ => None,
        })
        .collect();
    alerts.sort_by_key(|alert| std::cmp::Reverse(alert.days_overdue));
    alerts
}
