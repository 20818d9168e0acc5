use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Normalized territory identifier.
///
/// Jurisdiction strings on trademarks and territory lists on licensing
/// agreements are folded into this key at the storage boundary, so the
/// analysis core compares canonical values instead of raw text. Formatting
/// drift such as `" Texas "` vs `"texas"` collapses to the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Territory(String);

impl Territory {
    pub fn new(raw: &str) -> Result<Self, PortfolioError> {
        let key = raw
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if key.is_empty() {
            return Err(PortfolioError::EmptyTerritory);
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Title-cased form for reports and calendar entries.
    pub fn display_name(&self) -> String {
        self.0
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Territory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Territory {
    type Error = PortfolioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Territory> for String {
    fn from(value: Territory) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrademarkStatus {
    Active,
    Pending,
    Abandoned,
}

impl TrademarkStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Abandoned => "Abandoned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementStatus {
    Active,
    Pending,
    Expired,
}

impl AgreementStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Expired => "Expired",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

/// A single registered or pending trademark in the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trademark {
    pub id: u64,
    pub name: String,
    pub jurisdiction: Territory,
    pub filing_date: NaiveDate,
    pub renewal_date: NaiveDate,
    pub status: TrademarkStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
}

impl Trademark {
    /// Invariants enforced at the storage boundary: records are immutable
    /// once an analysis run begins, so a record that loads is a record the
    /// core can trust.
    pub fn validate(&self) -> Result<(), PortfolioError> {
        if self.name.trim().is_empty() {
            return Err(PortfolioError::EmptyName { id: self.id });
        }
        if self.renewal_date < self.filing_date {
            return Err(PortfolioError::RenewalBeforeFiling {
                id: self.id,
                filing_date: self.filing_date,
                renewal_date: self.renewal_date,
            });
        }
        Ok(())
    }
}

/// A licensing agreement granting a licensee rights within listed territories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicensingAgreement {
    pub id: u64,
    pub licensee: String,
    pub territories: BTreeSet<Territory>,
    pub status: AgreementStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("territory name must not be empty")]
    EmptyTerritory,
    #[error("trademark {id} has an empty name")]
    EmptyName { id: u64 },
    #[error("trademark {id} renews {renewal_date}, before its {filing_date} filing")]
    RenewalBeforeFiling {
        id: u64,
        filing_date: NaiveDate,
        renewal_date: NaiveDate,
    },
}
