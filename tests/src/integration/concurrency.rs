//! # Concurrent Access
//!
//! The store and query engine are shared across threads through `Arc`.
//! Racing writers to one address see exactly one success.

#[cfg(test)]
mod tests {
    use crate::fixtures::{clocked_store, populate, signer};
    use mi_01_record_store::{MemoryError, RecordSigner, RecordStoreApi};
    use mi_02_query_engine::MemoryQueryApi;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_racing_writers_one_winner() {
        let (store, _clock, queries) = clocked_store();
        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    let alice = signer(1);
                    barrier.wait();
                    store.store_memory(&alice, "contested".into(), vec![format!("t{i}")])
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1);
        let address = *winners[0];
        assert!(results.iter().filter(|r| r.is_err()).all(|r| {
            *r == Err(MemoryError::AlreadyExists { address })
        }));
        assert_eq!(queries.count().unwrap(), 1);
    }

    #[test]
    fn test_independent_writers_all_land() {
        let (store, _clock, queries) = clocked_store();

        let handles: Vec<_> = (1..=4u8)
            .map(|seed| {
                let store = Arc::clone(&store);
                thread::spawn(move || populate(&*store, &signer(seed), 50, &["a", "b"], 1))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap().len(), 50);
        }

        assert_eq!(queries.count().unwrap(), 200);
        assert_eq!(queries.by_tag("a").unwrap().len(), 100);
        for seed in 1..=4u8 {
            let mine = queries.by_authority(&signer(seed).authority()).unwrap();
            assert_eq!(mine.len(), 50);
        }
    }

    #[test]
    fn test_readers_see_whole_records_during_writes() {
        let (store, _clock, queries) = clocked_store();
        let queries = Arc::new(queries);

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || populate(&*store, &signer(1), 200, &["x", "y"], 2))
        };

        let readers: Vec<_> = (0..3)
            .map(|_| {
                let queries = Arc::clone(&queries);
                thread::spawn(move || {
                    let mut last = 0;
                    for _ in 0..50 {
                        let all = queries.all().unwrap();
                        assert!(all.len() >= last);
                        assert!(all.iter().all(|r| r.tags.len() == 2));
                        last = all.len();
                    }
                })
            })
            .collect();

        writer.join().unwrap().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(queries.count().unwrap(), 200);
    }
}
