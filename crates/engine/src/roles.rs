//! Role contracts for the transport layer
//!
//! A remote front end exposes two audiences: customers and the stock
//! manager. Each gets a trait naming exactly the operations it may call,
//! so a server can be written against the role rather than against
//! `Ledger` itself.

use crate::ledger::Ledger;
use bookledger_core::{
    Book, CopyRequest, EditorPickRequest, Isbn, NewItem, RatingRequest, Result, StockBook,
};

/// Customer-facing operations
pub trait BookStore: Send + Sync {
    /// Buy copies, all or nothing
    fn buy_books(&self, requests: &[CopyRequest]) -> Result<()>;

    /// Rate books, all or nothing
    fn rate_books(&self, ratings: &[RatingRequest]) -> Result<()>;

    /// Customer view of the given books
    fn get_books(&self, isbns: &[Isbn]) -> Result<Vec<Book>>;

    /// Up to `n` editor picks, sampled at random
    fn get_editor_picks(&self, n: usize) -> Result<Vec<Book>>;

    /// The `n` best-rated books
    fn get_top_rated_books(&self, n: usize) -> Result<Vec<Book>>;
}

/// Stock-manager operations
pub trait StockManager: Send + Sync {
    /// Add new books, all or nothing
    fn add_books(&self, books: &[NewItem]) -> Result<()>;

    /// Restock existing books, all or nothing
    fn add_copies(&self, copies: &[CopyRequest]) -> Result<()>;

    /// Stock view of every book
    fn get_stock_books(&self) -> Result<Vec<StockBook>>;

    /// Set or clear editor picks, all or nothing
    fn update_editor_picks(&self, picks: &[EditorPickRequest]) -> Result<()>;

    /// Stock view of the given books
    fn get_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>>;

    /// Stock view of every book with unmet demand
    fn get_books_in_demand(&self) -> Result<Vec<StockBook>>;

    /// Remove the given books, all or nothing
    fn remove_books(&self, isbns: &[Isbn]) -> Result<()>;

    /// Remove every book
    fn remove_all_books(&self) -> Result<()>;
}

impl BookStore for Ledger {
    fn buy_books(&self, requests: &[CopyRequest]) -> Result<()> {
        self.purchase(requests)
    }

    fn rate_books(&self, ratings: &[RatingRequest]) -> Result<()> {
        self.rate(ratings)
    }

    fn get_books(&self, isbns: &[Isbn]) -> Result<Vec<Book>> {
        Ledger::get_books(self, isbns)
    }

    fn get_editor_picks(&self, n: usize) -> Result<Vec<Book>> {
        Ok(self.editor_picks(n))
    }

    fn get_top_rated_books(&self, n: usize) -> Result<Vec<Book>> {
        self.top_rated(n)
    }
}

impl StockManager for Ledger {
    fn add_books(&self, books: &[NewItem]) -> Result<()> {
        self.add_items(books).map(|_| ())
    }

    fn add_copies(&self, copies: &[CopyRequest]) -> Result<()> {
        self.restock(copies)
    }

    fn get_stock_books(&self) -> Result<Vec<StockBook>> {
        Ok(self.list_all())
    }

    fn update_editor_picks(&self, picks: &[EditorPickRequest]) -> Result<()> {
        self.set_editor_picks(picks)
    }

    fn get_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
        self.list_by_keys(isbns)
    }

    fn get_books_in_demand(&self) -> Result<Vec<StockBook>> {
        Ok(self.in_demand())
    }

    fn remove_books(&self, isbns: &[Isbn]) -> Result<()> {
        self.remove_items(isbns).map(|_| ())
    }

    fn remove_all_books(&self) -> Result<()> {
        self.remove_all();
        Ok(())
    }
}
