use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::NaiveDate;
use markwarden::portfolio::store::seed_sample;
use markwarden::portfolio::{
    JsonFileStore, PortfolioRepository, StoreError, Territory, TrademarkDraft, TrademarkStatus,
};

static DIR_SEQUENCE: AtomicU32 = AtomicU32::new(0);

fn scratch_dir(label: &str) -> PathBuf {
    let seq = DIR_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!(
        "markwarden-store-{label}-{}-{seq}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn store_in(dir: &PathBuf) -> JsonFileStore {
    JsonFileStore::new(
        dir.join("trademarks.json"),
        dir.join("licensing_agreements.json"),
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn draft(name: &str, jurisdiction: &str) -> TrademarkDraft {
    TrademarkDraft {
        name: name.to_string(),
        jurisdiction: Territory::new(jurisdiction).expect("valid territory"),
        filing_date: date(2025, 11, 15),
        renewal_date: date(2035, 11, 15),
        registration_number: None,
    }
}

#[test]
fn missing_portfolio_file_is_fatal() {
    let dir = scratch_dir("missing-portfolio");
    let store = store_in(&dir);

    let err = store
        .load_trademarks()
        .expect_err("missing portfolio should fail");
    assert!(matches!(err, StoreError::MissingPortfolio { .. }));
}

#[test]
fn missing_agreements_file_reads_as_empty() {
    let dir = scratch_dir("missing-agreements");
    let store = store_in(&dir);

    let agreements = store
        .load_agreements()
        .expect("absent agreements should load as no data");
    assert!(agreements.is_empty());
}

#[test]
fn append_assigns_monotonic_ids_and_persists() {
    let dir = scratch_dir("append");
    let store = store_in(&dir);

    let first = store
        .append_trademark(draft("FIRST MARK", "Arizona"))
        .expect("append to empty store");
    assert_eq!(first.id, 1);
    assert_eq!(first.status, TrademarkStatus::Active);
    assert_eq!(first.jurisdiction, Territory::new("arizona").expect("key"));

    let second = store
        .append_trademark(draft("SECOND MARK", "Illinois"))
        .expect("append second record");
    assert_eq!(second.id, 2);

    let reloaded = store.load_trademarks().expect("reload persisted records");
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded[0].name, "FIRST MARK");
    assert_eq!(reloaded[1].id, 2);
}

#[test]
fn ids_are_never_reused_after_removals() {
    let dir = scratch_dir("id-reuse");
    let store = store_in(&dir);

    store
        .append_trademark(draft("KEEP", "oregon"))
        .expect("first append");
    let removed = store
        .append_trademark(draft("DROP", "utah"))
        .expect("second append");
    assert_eq!(removed.id, 2);

    // Simulate an external removal of the first record; the next id must
    // still advance past the highest ever assigned.
    let survivors: Vec<_> = store
        .load_trademarks()
        .expect("load")
        .into_iter()
        .filter(|tm| tm.name == "DROP")
        .collect();
    let rendered = serde_json::to_string_pretty(&survivors).expect("serialize survivors");
    fs::write(dir.join("trademarks.json"), rendered).expect("rewrite portfolio");

    let next = store
        .append_trademark(draft("NEXT", "idaho"))
        .expect("append after removal");
    assert_eq!(next.id, 3);
}

#[test]
fn malformed_dates_fail_the_whole_load() {
    let dir = scratch_dir("malformed");
    fs::write(
        dir.join("trademarks.json"),
        r#"[{"id":1,"name":"MARK","jurisdiction":"texas","filing_date":"not-a-date","renewal_date":"2030-01-01","status":"active"}]"#,
    )
    .expect("write fixture");
    let store = store_in(&dir);

    let err = store
        .load_trademarks()
        .expect_err("malformed date should fail");
    assert!(matches!(err, StoreError::Malformed { .. }));
}

#[test]
fn renewal_before_filing_is_rejected() {
    let dir = scratch_dir("inverted-dates");
    let store = store_in(&dir);

    let mut inverted = draft("BACKWARDS", "texas");
    inverted.filing_date = date(2030, 1, 1);
    inverted.renewal_date = date(2020, 1, 1);

    let err = store
        .append_trademark(inverted)
        .expect_err("inverted dates should be rejected");
    assert!(matches!(err, StoreError::Invalid(_)));
}

#[test]
fn loaded_records_normalize_territory_keys() {
    let dir = scratch_dir("normalize");
    fs::write(
        dir.join("trademarks.json"),
        r#"[{"id":1,"name":"MARK","jurisdiction":" New  Mexico ","filing_date":"2020-01-01","renewal_date":"2030-01-01","status":"active"}]"#,
    )
    .expect("write fixture");
    let store = store_in(&dir);

    let trademarks = store.load_trademarks().expect("load fixture");
    assert_eq!(
        trademarks[0].jurisdiction,
        Territory::new("new mexico").expect("key")
    );
}

#[test]
fn seed_then_load_round_trips_both_collections() {
    let dir = scratch_dir("seed");
    let store = store_in(&dir);

    seed_sample(&store).expect("seed fixtures");

    let trademarks = store.load_trademarks().expect("load seeded portfolio");
    let agreements = store.load_agreements().expect("load seeded agreements");
    assert!(!trademarks.is_empty());
    assert!(!agreements.is_empty());
    assert!(trademarks.iter().any(|tm| tm.status == TrademarkStatus::Pending));

    // Seeding is explicit; constructing the store alone must not write files.
    let untouched = scratch_dir("no-side-effects");
    let _ = store_in(&untouched);
    assert!(!untouched.join("trademarks.json").exists());
    assert!(!untouched.join("licensing_agreements.json").exists());
}
