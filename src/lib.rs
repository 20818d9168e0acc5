//! Trademark portfolio renewal tracking and licensing coverage analysis.
//!
//! The analysis core (`portfolio::renewals`, `portfolio::coverage`) is pure:
//! it takes record snapshots plus an explicit `as_of` date and returns new
//! structures. Storage, calendar emission, and email rendering sit around it
//! as thin collaborators.

pub mod config;
pub mod error;
pub mod notify;
pub mod portfolio;
pub mod telemetry;
