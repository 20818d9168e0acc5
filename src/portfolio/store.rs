//! JSON-backed persistence for the portfolio and licensing collections.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::domain::{
    AgreementStatus, LicensingAgreement, PortfolioError, Territory, Trademark, TrademarkStatus,
};

/// Fields supplied when registering a new trademark; the store assigns the
/// id and initial status.
#[derive(Debug, Clone)]
pub struct TrademarkDraft {
    pub name: String,
    pub jurisdiction: Territory,
    pub filing_date: NaiveDate,
    pub renewal_date: NaiveDate,
    pub registration_number: Option<String>,
}

/// Storage abstraction so analysis and notification code can be exercised
/// against in-memory fixtures.
pub trait PortfolioRepository {
    fn load_trademarks(&self) -> Result<Vec<Trademark>, StoreError>;
    fn load_agreements(&self) -> Result<Vec<LicensingAgreement>, StoreError>;
    fn append_trademark(&self, draft: TrademarkDraft) -> Result<Trademark, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("portfolio file not found: {}", path.display())]
    MissingPortfolio { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed records in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Invalid(#[from] PortfolioError),
}

/// Two JSON array files: the trademark portfolio (required) and the
/// licensing agreements (optional; absent reads as empty).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    trademarks_path: PathBuf,
    agreements_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(trademarks_path: impl Into<PathBuf>, agreements_path: impl Into<PathBuf>) -> Self {
        Self {
            trademarks_path: trademarks_path.into(),
            agreements_path: agreements_path.into(),
        }
    }

    fn read_trademarks(&self, missing_is_empty: bool) -> Result<Vec<Trademark>, StoreError> {
        let raw = match fs::read_to_string(&self.trademarks_path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                if missing_is_empty {
                    return Ok(Vec::new());
                }
                return Err(StoreError::MissingPortfolio {
                    path: self.trademarks_path.clone(),
                });
            }
            Err(err) => {
                return Err(StoreError::Io {
                    path: self.trademarks_path.clone(),
                    source: err,
                })
            }
        };

        let trademarks: Vec<Trademark> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
                path: self.trademarks_path.clone(),
                source,
            })?;

        for tm in &trademarks {
            tm.validate()?;
        }
        Ok(trademarks)
    }

    fn write_trademarks(&self, trademarks: &[Trademark]) -> Result<(), StoreError> {
        write_json(&self.trademarks_path, trademarks)
    }
}

impl PortfolioRepository for JsonFileStore {
    /// The primary collection; a missing file is fatal because the system
    /// has nothing to report without it.
    fn load_trademarks(&self) -> Result<Vec<Trademark>, StoreError> {
        self.read_trademarks(false)
    }

    /// Agreements are optional input; a missing file reads as no data.
    fn load_agreements(&self) -> Result<Vec<LicensingAgreement>, StoreError> {
        let raw = match fs::read_to_string(&self.agreements_path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(StoreError::Io {
                    path: self.agreements_path.clone(),
                    source: err,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
            path: self.agreements_path.clone(),
            source,
        })
    }

    /// Appends one record and persists the full collection. Ids are
    /// monotonic over the life of the file and never reused after removals.
    fn append_trademark(&self, draft: TrademarkDraft) -> Result<Trademark, StoreError> {
        let mut trademarks = self.read_trademarks(true)?;
        let next_id = trademarks.iter().map(|tm| tm.id).max().unwrap_or(0) + 1;

        let record = Trademark {
            id: next_id,
            name: draft.name,
            jurisdiction: draft.jurisdiction,
            filing_date: draft.filing_date,
            renewal_date: draft.renewal_date,
            status: TrademarkStatus::Active,
            registration_number: draft.registration_number,
        };
        record.validate()?;

        trademarks.push(record.clone());
        self.write_trademarks(&trademarks)?;
        Ok(record)
    }
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let rendered = serde_json::to_string_pretty(value).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, rendered).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes demo fixtures for both collections. This is an explicit operation,
/// never a side effect of opening the store.
pub fn seed_sample(store: &JsonFileStore) -> Result<(), StoreError> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date");
    let territory = |raw: &str| Territory::new(raw).map_err(StoreError::from);

    let trademarks = vec![
        Trademark {
            id: 1,
            name: "NORTHWIND BOTANICALS".to_string(),
            jurisdiction: territory("california")?,
            filing_date: date(2021, 3, 12),
            renewal_date: date(2031, 3, 12),
            status: TrademarkStatus::Active,
            registration_number: Some("5834921".to_string()),
        },
        Trademark {
            id: 2,
            name: "NORTHWIND BOTANICALS".to_string(),
            jurisdiction: territory("arizona")?,
            filing_date: date(2024, 11, 15),
            renewal_date: date(2034, 11, 15),
            status: TrademarkStatus::Pending,
            registration_number: None,
        },
        Trademark {
            id: 3,
            name: "NORTHWIND SELECT".to_string(),
            jurisdiction: territory("oregon")?,
            filing_date: date(2019, 6, 1),
            renewal_date: date(2029, 6, 1),
            status: TrademarkStatus::Active,
            registration_number: Some("6102284".to_string()),
        },
    ];

    let agreements = vec![
        LicensingAgreement {
            id: 1,
            licensee: "Cascade Brands LLC".to_string(),
            territories: BTreeSet::from([
                territory("california")?,
                territory("arizona")?,
                territory("illinois")?,
            ]),
            status: AgreementStatus::Active,
        },
        LicensingAgreement {
            id: 2,
            licensee: "Maple Leaf Partners".to_string(),
            territories: BTreeSet::from([territory("canada")?]),
            status: AgreementStatus::Pending,
        },
    ];

    write_json(&store.trademarks_path, &trademarks)?;
    write_json(&store.agreements_path, &agreements)
}
