//! Whole-catalog queries
//!
//! Every function here scans the full catalog, so callers must hold an
//! exclusive lock scope for the duration of the call. Results are copies
//! ordered by key unless stated otherwise.

use bookledger_core::{Book, InventoryRecord, LedgerError, Result, StockBook};
use bookledger_storage::Catalog;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use tracing::trace;

/// Stock view of every record
pub fn list_all(catalog: &Catalog) -> Vec<StockBook> {
    let mut books = catalog.collect(|_| true, InventoryRecord::to_stock_book);
    books.sort_unstable_by_key(|book| book.isbn);
    books
}

/// Stock view of every record with at least one sale miss
pub fn in_demand(catalog: &Catalog) -> Vec<StockBook> {
    let mut books = catalog.collect(InventoryRecord::has_sale_miss, InventoryRecord::to_stock_book);
    books.sort_unstable_by_key(|book| book.isbn);
    books
}

/// The `n` best-rated records, highest average first
///
/// Equal averages are ordered by ascending key. An empty catalog yields an
/// empty result for any `n`.
///
/// # Errors
///
/// `InsufficientItems` when the catalog is non-empty and holds fewer than
/// `n` records.
pub fn top_rated(catalog: &Catalog, n: usize) -> Result<Vec<Book>> {
    let mut books = catalog.collect(|_| true, InventoryRecord::to_book);
    if books.is_empty() {
        return Ok(books);
    }
    if n > books.len() {
        return Err(LedgerError::InsufficientItems {
            requested: n,
            available: books.len(),
        });
    }

    books.sort_unstable_by(by_rating_then_key);
    books.truncate(n);
    trace!(target: "bookledger::query", n, "Top rated computed");
    Ok(books)
}

fn by_rating_then_key(a: &Book, b: &Book) -> Ordering {
    b.average_rating
        .total_cmp(&a.average_rating)
        .then_with(|| a.isbn.cmp(&b.isbn))
}

/// Up to `n` editor picks drawn uniformly without replacement
///
/// When `n` covers the whole pick set every pick is returned, ordered by
/// key; otherwise the sample order is random.
pub fn editor_picks(catalog: &Catalog, n: usize, rng: &mut StdRng) -> Vec<Book> {
    let mut picks = catalog.collect(InventoryRecord::is_editor_pick, InventoryRecord::to_book);
    // Sample from key order, not map order
    picks.sort_unstable_by_key(|book| book.isbn);

    if n >= picks.len() {
        return picks;
    }
    picks.choose_multiple(rng, n).cloned().collect()
}
