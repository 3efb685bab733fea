//! Validator: pure admission checks for proposed changes
//!
//! Every function reads the catalog and the proposed change, never
//! mutates anything, and classifies the change as accepted (`Ok`) or
//! rejected with the reason.
//!
//! ## Check order
//!
//! Key checks come before value checks, so an entry with both a bad key
//! and a bad value reports the key problem.

use bookledger_core::{
    CopyRequest, Isbn, LedgerError, NewItem, RatingRequest, Result, MAX_RATING, MIN_RATING,
};
use bookledger_storage::Catalog;
use rustc_hash::FxHashSet;

/// Check that a key is positive
pub fn validate_key(isbn: Isbn) -> Result<()> {
    if isbn.is_valid() {
        Ok(())
    } else {
        Err(LedgerError::InvalidKey(isbn))
    }
}

/// Check that a key is positive and present in the catalog
pub fn validate_existing_key(catalog: &Catalog, isbn: Isbn) -> Result<()> {
    validate_key(isbn)?;
    if catalog.contains(isbn) {
        Ok(())
    } else {
        Err(LedgerError::NotFound(isbn))
    }
}

/// Check that a copy count is at least 1 and return it unsigned
pub fn validate_copies(isbn: Isbn, copies: i64) -> Result<u64> {
    match u64::try_from(copies) {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(LedgerError::InvalidQuantity { isbn, copies }),
    }
}

/// Check a restock or purchase entry
pub fn validate_copy_request(catalog: &Catalog, request: &CopyRequest) -> Result<u64> {
    validate_existing_key(catalog, request.isbn)?;
    validate_copies(request.isbn, request.copies)
}

/// Check a rating entry and return the rating unsigned
pub fn validate_rating(catalog: &Catalog, request: &RatingRequest) -> Result<u32> {
    validate_existing_key(catalog, request.isbn)?;
    if (MIN_RATING..=MAX_RATING).contains(&request.rating) {
        u32::try_from(request.rating).map_err(|_| LedgerError::InvalidRating {
            isbn: request.isbn,
            rating: request.rating,
        })
    } else {
        Err(LedgerError::InvalidRating {
            isbn: request.isbn,
            rating: request.rating,
        })
    }
}

/// Check that a new item is well-formed and its key unused
pub fn validate_new_item(catalog: &Catalog, item: &NewItem) -> Result<()> {
    validate_key(item.isbn)?;

    if item.title.trim().is_empty() {
        return Err(LedgerError::invalid_item(item.isbn, "title is empty"));
    }
    if item.author.trim().is_empty() {
        return Err(LedgerError::invalid_item(item.isbn, "author is empty"));
    }
    if item.copies < 1 {
        return Err(LedgerError::invalid_item(
            item.isbn,
            format!("copies must be at least 1, got {}", item.copies),
        ));
    }
    if !item.price.is_finite() || item.price < 0.0 {
        return Err(LedgerError::invalid_item(
            item.isbn,
            format!("price must be a non-negative number, got {}", item.price),
        ));
    }

    if catalog.contains(item.isbn) {
        return Err(LedgerError::DuplicateKey(item.isbn));
    }
    Ok(())
}

/// Check a whole batch of new items, including repeats within the batch
pub fn validate_new_items(catalog: &Catalog, items: &[NewItem]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for item in items {
        validate_new_item(catalog, item)?;
        if !seen.insert(item.isbn) {
            return Err(LedgerError::DuplicateKey(item.isbn));
        }
    }
    Ok(())
}
