//! Configuration files and the builder

use crate::test_utils::*;
use bookledger::CONFIG_FILE_NAME;
use tempfile::TempDir;

#[test]
fn ledger_from_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "locking = \"coarse\"\nrng_seed = 5\n").unwrap();

    let config = LedgerConfig::from_file(&path).unwrap();
    let ledger = Ledger::from_config(&config);
    assert_eq!(ledger.strategy(), LockingStrategy::Coarse);
}

#[test]
fn default_file_gives_fine_grained() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    LedgerConfig::write_default_if_missing(&path).unwrap();

    let ledger = Ledger::from_config(&LedgerConfig::from_file(&path).unwrap());
    assert_eq!(ledger.strategy(), LockingStrategy::FineGrained);
}

#[test]
fn invalid_config_is_rejected() {
    let err = LedgerConfig::from_toml_str("locking = 3").unwrap_err();
    assert!(matches!(err, LedgerError::Config(_)));
    assert!(err.to_string().contains("config"));
}

#[test]
fn same_seed_same_picks() {
    let build = || {
        let ledger = Ledger::builder().rng_seed(77).build();
        let items: Vec<NewItem> = (1..=20)
            .map(|i| NewItem::new(i, "T", "A", 1.0, 1))
            .collect();
        ledger.add_items(&items).unwrap();
        let picks: Vec<EditorPickRequest> =
            (1..=20).map(|i| EditorPickRequest::new(i, true)).collect();
        ledger.set_editor_picks(&picks).unwrap();
        ledger
    };

    let (a, b) = (build(), build());
    for _ in 0..5 {
        assert_eq!(a.editor_picks(4), b.editor_picks(4));
    }
}

#[test]
fn stats_track_outcomes() {
    for_each_strategy(|ledger| {
        let base = ledger.stats();
        ledger.purchase(&[CopyRequest::new(TEST_ISBN, 1)]).unwrap();
        ledger
            .purchase(&[CopyRequest::new(TEST_ISBN, NUM_COPIES)])
            .unwrap_err();
        ledger.top_rated(100).unwrap_err();

        let stats = ledger.stats();
        assert_eq!(stats.committed - base.committed, 1);
        assert_eq!(stats.aborted - base.aborted, 2);
        assert_eq!(stats.sale_miss_events, 1);
        assert!(stats.abort_rate() > 0.0);
    });
}
