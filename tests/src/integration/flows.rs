//! # Store and Query Flows
//!
//! A record accepted by the Record Store is visible to every matching
//! Query Engine call; a rejected one is visible to none.

#[cfg(test)]
mod tests {
    use crate::fixtures::{clocked_store, init_test_logging, signer, tags, T0};
    use mi_01_record_store::{
        MemoryError, RecordSigner, RecordStoreApi, WriteOperation, MAX_CID_LEN, MAX_TAGS,
        MAX_TAG_LEN,
    };
    use mi_02_query_engine::{MemoryQueryApi, RecordFilter};

    #[test]
    fn test_stored_memory_is_found_by_every_query() {
        init_test_logging();
        let (store, _clock, queries) = clocked_store();
        let alice = signer(1);

        let address = store
            .store_memory(&alice, "bafyNote".into(), tags(&["rust", "notes"]))
            .unwrap();
        let record = store.get(&address).unwrap();

        assert_eq!(queries.by_tag("rust").unwrap(), vec![record.clone()]);
        assert_eq!(queries.by_tags(&["notes", "rust"]).unwrap(), vec![record.clone()]);
        assert_eq!(
            queries.by_authority(&alice.authority()).unwrap(),
            vec![record.clone()]
        );
        assert_eq!(queries.by_time_range(T0, T0).unwrap(), vec![record.clone()]);
        assert_eq!(queries.all().unwrap(), vec![record]);
        assert_eq!(queries.count().unwrap(), 1);
    }

    #[test]
    fn test_rejected_writes_are_never_visible() {
        init_test_logging();
        let (store, _clock, queries) = clocked_store();
        let alice = signer(1);

        let attempts = [
            ("c".repeat(MAX_CID_LEN + 1), tags(&["a"])),
            ("cid".to_string(), vec!["a".to_string(); MAX_TAGS + 1]),
            ("cid".to_string(), vec!["a".repeat(MAX_TAG_LEN + 1)]),
        ];
        for (cid, record_tags) in attempts {
            let err = store.store_memory(&alice, cid, record_tags).unwrap_err();
            assert!(err.is_validation(), "unexpected error {err:?}");
        }

        let mut forged = alice.sign(WriteOperation::new("cid", tags(&["a"])));
        forged.authority = signer(2).authority();
        assert!(matches!(
            store.put(forged),
            Err(MemoryError::InvalidSignature { .. })
        ));

        assert_eq!(queries.count().unwrap(), 0);
        assert!(queries.by_tag("a").unwrap().is_empty());
        assert!(queries.by_authority(&alice.authority()).unwrap().is_empty());
    }

    #[test]
    fn test_boundary_write_is_queryable() {
        let (store, _clock, queries) = clocked_store();
        let tag = "t".repeat(MAX_TAG_LEN);
        let record_tags = vec![tag.clone(); MAX_TAGS];

        store
            .store_memory(&signer(1), "c".repeat(MAX_CID_LEN), record_tags)
            .unwrap();

        assert_eq!(queries.by_tag(&tag).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_write_keeps_original_everywhere() {
        let (store, clock, queries) = clocked_store();
        let alice = signer(1);

        let address = store
            .store_memory(&alice, "cid".into(), tags(&["v1"]))
            .unwrap();
        clock.advance(60);

        for _ in 0..5 {
            assert_eq!(
                store.store_memory(&alice, "cid".into(), tags(&["v2"])),
                Err(MemoryError::AlreadyExists { address })
            );
        }

        assert_eq!(queries.count().unwrap(), 1);
        assert!(queries.by_tag("v2").unwrap().is_empty());
        assert_eq!(queries.by_time_range(T0 + 1, i64::MAX).unwrap(), vec![]);
    }

    #[test]
    fn test_get_by_cid_agrees_with_authority_query() {
        let (store, _clock, queries) = clocked_store();
        let alice = signer(1);
        let bob = signer(2);

        store.store_memory(&alice, "shared".into(), vec![]).unwrap();
        store.store_memory(&bob, "shared".into(), vec![]).unwrap();

        let alices = queries.by_authority(&alice.authority()).unwrap();
        assert_eq!(alices.len(), 1);
        assert_eq!(
            store.get_by_cid(&alice.authority(), "shared").unwrap(),
            alices[0]
        );
    }

    #[test]
    fn test_time_window_across_clock_steps() {
        let (store, clock, queries) = clocked_store();
        let alice = signer(1);

        for hour in 0..24 {
            clock.set(T0 + hour * 3600);
            store
                .store_memory(&alice, format!("hour-{hour}"), tags(&["hourly"]))
                .unwrap();
        }

        let morning = queries.by_time_range(T0, T0 + 11 * 3600).unwrap();
        assert_eq!(morning.len(), 12);
        assert!(morning.iter().all(|r| r.timestamp <= T0 + 11 * 3600));

        let filter = RecordFilter::TimeRange {
            start: T0 + 12 * 3600,
            end: T0 + 23 * 3600,
        }
        .and(RecordFilter::Tag("hourly".to_string()));
        assert_eq!(queries.query(&filter).unwrap().len(), 12);

        assert!(queries.by_time_range(T0 + 3600, T0).unwrap().is_empty());
    }
}
