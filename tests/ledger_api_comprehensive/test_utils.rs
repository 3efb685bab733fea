//! Shared helpers for the ledger API tests

pub use bookledger::prelude::*;

/// Key of the book every fixture starts with
pub const TEST_ISBN: i64 = 3_044_560;
/// Copies of the default book
pub const NUM_COPIES: i64 = 5;

/// The default book every fixture starts with
pub fn default_book() -> NewItem {
    NewItem::new(TEST_ISBN, "Harry Potter and JUnit", "JK Unit", 10.0, NUM_COPIES)
}

/// A ledger holding only the default book
pub fn fixture(strategy: LockingStrategy) -> Ledger {
    let ledger = Ledger::builder().strategy(strategy).rng_seed(2024).build();
    ledger.add_items(&[default_book()]).unwrap();
    ledger
}

/// Run `test` once per locking strategy against a fresh fixture
pub fn for_each_strategy(test: impl Fn(Ledger)) {
    for strategy in LockingStrategy::ALL {
        test(fixture(strategy));
    }
}

/// Stock view of one book
pub fn stock(ledger: &Ledger, isbn: i64) -> StockBook {
    ledger.list_by_keys(&[Isbn::new(isbn)]).unwrap().remove(0)
}

/// Add a plain book with `copies` copies
pub fn add_book(ledger: &Ledger, isbn: i64, copies: i64) {
    ledger
        .add_items(&[NewItem::new(isbn, "Test of Thrones", "George RR Testin'", 10.0, copies)])
        .unwrap();
}
