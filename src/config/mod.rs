use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::notify::CalendarConfig;

/// Flat per-territory filing estimate used when no override is configured.
const DEFAULT_FILING_COST: u32 = 3_900;

/// Top-level configuration for the application, sourced from the
/// environment (with `.env` support for local runs).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub analysis: AnalysisConfig,
    pub email: EmailConfig,
    pub calendar: CalendarConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let trademarks_path = env::var("MARKWARDEN_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("trademarks.json"));
        let agreements_path = env::var("MARKWARDEN_LICENSING_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("licensing_agreements.json"));

        let filing_cost = match env::var("MARKWARDEN_FILING_COST") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidFilingCost { value: raw })?,
            Err(_) => DEFAULT_FILING_COST,
        };

        let recipients = env::var("MARKWARDEN_ALERT_RECIPIENTS")
            .unwrap_or_else(|_| "legal@example.com".to_string())
            .split(',')
            .map(|addr| addr.trim().to_string())
            .filter(|addr| !addr.is_empty())
            .collect();

        let mut calendar = CalendarConfig::default();
        if let Ok(name) = env::var("MARKWARDEN_CALENDAR_NAME") {
            calendar.name = name;
        }
        if let Ok(domain) = env::var("MARKWARDEN_UID_DOMAIN") {
            calendar.uid_domain = domain;
        }

        let log_level = env::var("MARKWARDEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            storage: StorageConfig {
                trademarks_path,
                agreements_path,
            },
            analysis: AnalysisConfig { filing_cost },
            email: EmailConfig { recipients },
            calendar,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Locations of the two JSON collections.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub trademarks_path: PathBuf,
    pub agreements_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub filing_cost: u32,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub recipients: Vec<String>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFilingCost { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFilingCost { value } => {
                write!(
                    f,
                    "MARKWARDEN_FILING_COST must be a whole dollar amount, got '{value}'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
