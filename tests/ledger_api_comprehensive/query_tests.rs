//! Queries: listings, top rated, editor picks and in demand

use crate::test_utils::*;

fn rated_fixture(ledger: &Ledger) {
    // Averages 1.0, 2.0, 5.0, 4.0
    for (isbn, ratings) in [(1, vec![1]), (2, vec![2, 2]), (3, vec![5]), (4, vec![3, 5])] {
        add_book(ledger, isbn, 5);
        let batch: Vec<RatingRequest> = ratings
            .into_iter()
            .map(|r| RatingRequest::new(isbn, r))
            .collect();
        ledger.rate(&batch).unwrap();
    }
}

mod listings {
    use super::*;

    #[test]
    fn list_all_returns_every_book() {
        for_each_strategy(|ledger| {
            add_book(&ledger, TEST_ISBN + 1, 5);
            add_book(&ledger, TEST_ISBN + 2, 5);
            let books = ledger.list_all();
            let isbns: Vec<i64> = books.iter().map(|b| b.isbn.get()).collect();
            assert_eq!(isbns, vec![TEST_ISBN, TEST_ISBN + 1, TEST_ISBN + 2]);
        });
    }

    #[test]
    fn list_by_keys_missing_key_fails_whole_query() {
        for_each_strategy(|ledger| {
            let err = ledger
                .list_by_keys(&[Isbn::new(TEST_ISBN), Isbn::new(TEST_ISBN + 9)])
                .unwrap_err();
            assert_eq!(err, LedgerError::NotFound(Isbn::new(TEST_ISBN + 9)));
        });
    }

    #[test]
    fn snapshots_are_copies() {
        for_each_strategy(|ledger| {
            let before = stock(&ledger, TEST_ISBN);
            ledger.purchase(&[CopyRequest::new(TEST_ISBN, 1)]).unwrap();
            assert_eq!(before.copies, NUM_COPIES as u64);
            assert_eq!(stock(&ledger, TEST_ISBN).copies, NUM_COPIES as u64 - 1);
        });
    }
}

mod top_rated {
    use super::*;

    #[test]
    fn highest_average_first() {
        for_each_strategy(|ledger| {
            ledger.remove_all();
            rated_fixture(&ledger);

            let books = ledger.top_rated(2).unwrap();
            let isbns: Vec<i64> = books.iter().map(|b| b.isbn.get()).collect();
            assert_eq!(isbns, vec![3, 4]);
            assert_eq!(books[0].average_rating, 5.0);
        });
    }

    #[test]
    fn zero_on_non_empty_is_empty() {
        for_each_strategy(|ledger| {
            assert!(ledger.top_rated(0).unwrap().is_empty());
        });
    }

    #[test]
    fn more_than_available_fails_without_change() {
        for_each_strategy(|ledger| {
            rated_fixture(&ledger);
            let before = ledger.list_all();
            let err = ledger.top_rated(10).unwrap_err();
            assert_eq!(
                err,
                LedgerError::InsufficientItems {
                    requested: 10,
                    available: 5
                }
            );
            assert_eq!(ledger.list_all(), before);
        });
    }

    #[test]
    fn empty_store_returns_empty() {
        for_each_strategy(|ledger| {
            ledger.remove_all();
            assert!(ledger.top_rated(5).unwrap().is_empty());
        });
    }

    #[test]
    fn unrated_books_rank_last() {
        for_each_strategy(|ledger| {
            rated_fixture(&ledger);
            let books = ledger.top_rated(5).unwrap();
            assert_eq!(books[4].isbn, Isbn::new(TEST_ISBN));
            assert_eq!(books[4].average_rating, 0.0);
        });
    }
}

mod editor_picks {
    use super::*;

    fn pick(ledger: &Ledger, isbns: &[i64]) {
        let batch: Vec<EditorPickRequest> = isbns
            .iter()
            .map(|&isbn| EditorPickRequest::new(isbn, true))
            .collect();
        ledger.set_editor_picks(&batch).unwrap();
    }

    #[test]
    fn n_at_least_pick_count_returns_all() {
        for_each_strategy(|ledger| {
            for isbn in 1..=5 {
                add_book(&ledger, isbn, 1);
            }
            pick(&ledger, &[2, 4]);

            let picks = ledger.editor_picks(2);
            let isbns: Vec<i64> = picks.iter().map(|b| b.isbn.get()).collect();
            assert_eq!(isbns, vec![2, 4]);
            assert_eq!(ledger.editor_picks(100).len(), 2);
        });
    }

    #[test]
    fn n_below_pick_count_samples_distinct_picks() {
        for_each_strategy(|ledger| {
            for isbn in 1..=10 {
                add_book(&ledger, isbn, 1);
            }
            pick(&ledger, &[1, 2, 3, 4, 5, 6]);

            let mut seen = std::collections::HashSet::new();
            for _ in 0..100 {
                let picks = ledger.editor_picks(3);
                assert_eq!(picks.len(), 3);
                let mut isbns: Vec<i64> = picks.iter().map(|b| b.isbn.get()).collect();
                isbns.sort_unstable();
                isbns.dedup();
                assert_eq!(isbns.len(), 3);
                assert!(isbns.iter().all(|&i| (1..=6).contains(&i)));
                seen.extend(isbns);
            }
            // Every pick shows up across 100 samples
            assert_eq!(seen.len(), 6);
        });
    }

    #[test]
    fn no_picks_returns_empty() {
        for_each_strategy(|ledger| {
            assert!(ledger.editor_picks(3).is_empty());
            assert!(ledger.editor_picks(0).is_empty());
        });
    }
}

mod in_demand {
    use super::*;

    #[test]
    fn only_books_with_sale_misses() {
        for_each_strategy(|ledger| {
            add_book(&ledger, 1, 1);
            assert!(ledger.in_demand().is_empty());

            ledger.purchase(&[CopyRequest::new(1, 4)]).unwrap_err();
            let demand = ledger.in_demand();
            assert_eq!(demand.len(), 1);
            assert_eq!(demand[0].isbn, Isbn::new(1));
            assert_eq!(demand[0].sale_misses, 3);

            ledger.restock(&[CopyRequest::new(1, 3)]).unwrap();
            assert!(ledger.in_demand().is_empty());
        });
    }
}
