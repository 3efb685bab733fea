//! Seeded random workloads checked against a serial model
//!
//! The model is a plain map applying the documented semantics one batch at
//! a time. After every batch, the ledger and the model must agree.

use crate::test_utils::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ModelBook {
    copies: u64,
    sale_misses: u64,
    times_rated: u64,
    total_rating: u64,
}

#[derive(Default)]
struct Model {
    books: BTreeMap<i64, ModelBook>,
}

impl Model {
    fn purchase(&mut self, batch: &[(i64, i64)]) -> bool {
        if batch.iter().any(|(k, n)| !self.books.contains_key(k) || *n < 1) {
            return false;
        }
        let mut demand: BTreeMap<i64, u64> = BTreeMap::new();
        for &(k, n) in batch {
            *demand.entry(k).or_default() += n as u64;
        }
        let short: Vec<(i64, u64)> = demand
            .iter()
            .filter(|(k, n)| self.books[*k].copies < **n)
            .map(|(k, n)| (*k, *n))
            .collect();
        if !short.is_empty() {
            for (k, n) in short {
                let book = self.books.get_mut(&k).unwrap();
                book.sale_misses += n - book.copies;
            }
            return false;
        }
        for (k, n) in demand {
            self.books.get_mut(&k).unwrap().copies -= n;
        }
        true
    }

    fn restock(&mut self, batch: &[(i64, i64)]) -> bool {
        if batch.iter().any(|(k, n)| !self.books.contains_key(k) || *n < 1) {
            return false;
        }
        for &(k, n) in batch {
            let book = self.books.get_mut(&k).unwrap();
            book.copies += n as u64;
            book.sale_misses = 0;
        }
        true
    }

    fn rate(&mut self, batch: &[(i64, i32)]) -> bool {
        if batch
            .iter()
            .any(|(k, r)| !self.books.contains_key(k) || !(0..=5).contains(r))
        {
            return false;
        }
        for &(k, r) in batch {
            let book = self.books.get_mut(&k).unwrap();
            book.times_rated += 1;
            book.total_rating += r as u64;
        }
        true
    }
}

fn assert_matches_model(ledger: &Ledger, model: &Model) {
    let books = ledger.list_all();
    assert_eq!(books.len(), model.books.len());
    for book in books {
        let expected = model.books[&book.isbn.get()];
        let actual = ModelBook {
            copies: book.copies,
            sale_misses: book.sale_misses,
            times_rated: book.times_rated,
            total_rating: book.total_rating,
        };
        assert_eq!(actual, expected, "isbn {}", book.isbn);
    }
}

fn run_workload(strategy: LockingStrategy, seed: u64) {
    const KEYS: i64 = 8;
    let mut rng = StdRng::seed_from_u64(seed);
    let ledger = Ledger::new(strategy);
    let mut model = Model::default();

    for k in 1..=KEYS {
        let copies = rng.gen_range(1..6);
        ledger
            .add_items(&[NewItem::new(k, "T", "A", 1.0, copies)])
            .unwrap();
        model.books.insert(
            k,
            ModelBook {
                copies: copies as u64,
                ..ModelBook::default()
            },
        );
    }

    for _ in 0..300 {
        let len = rng.gen_range(1..5);
        match rng.gen_range(0..3) {
            0 => {
                let batch: Vec<(i64, i64)> = (0..len)
                    .map(|_| (rng.gen_range(1..=KEYS + 1), rng.gen_range(0..5)))
                    .collect();
                let requests: Vec<CopyRequest> =
                    batch.iter().map(|&(k, n)| CopyRequest::new(k, n)).collect();
                assert_eq!(ledger.purchase(&requests).is_ok(), model.purchase(&batch));
            }
            1 => {
                let batch: Vec<(i64, i64)> = (0..len)
                    .map(|_| (rng.gen_range(1..=KEYS), rng.gen_range(0..4)))
                    .collect();
                let requests: Vec<CopyRequest> =
                    batch.iter().map(|&(k, n)| CopyRequest::new(k, n)).collect();
                assert_eq!(ledger.restock(&requests).is_ok(), model.restock(&batch));
            }
            _ => {
                let batch: Vec<(i64, i32)> = (0..len)
                    .map(|_| (rng.gen_range(1..=KEYS), rng.gen_range(-1..7)))
                    .collect();
                let requests: Vec<RatingRequest> =
                    batch.iter().map(|&(k, r)| RatingRequest::new(k, r)).collect();
                assert_eq!(ledger.rate(&requests).is_ok(), model.rate(&batch));
            }
        }
        assert_matches_model(&ledger, &model);
    }
}

#[test]
fn random_batches_match_serial_model() {
    for strategy in LockingStrategy::ALL {
        for seed in 0..10 {
            run_workload(strategy, seed);
        }
    }
}
