//! # File-Backed Persistence
//!
//! Records written through a file-backed store are visible, unchanged, to a
//! store reopened on the same log, and to queries over it.

#[cfg(test)]
mod tests {
    use crate::fixtures::{init_test_logging, populate, signer, tags};
    use mi_01_record_store::{
        DynRecordStore, FileRecordStore, MemoryError, RecordSigner, RecordStoreApi, StoreConfig,
    };
    use mi_02_query_engine::{MemoryQueryApi, MemoryQueryService};
    use std::io::Write;
    use std::sync::Arc;

    #[test]
    fn test_records_and_queries_survive_reopen() {
        init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new().with_data_path(dir.path().join("memories.log"));
        let alice = signer(1);

        let before = {
            let store = Arc::new(DynRecordStore::open(config.clone()).unwrap());
            populate(&*store, &alice, 25, &["rust", "go", "zig"], 2).unwrap();
            MemoryQueryService::new(store).all().unwrap()
        };

        let store = Arc::new(DynRecordStore::open(config).unwrap());
        let queries = MemoryQueryService::new(Arc::clone(&store));

        assert_eq!(queries.all().unwrap(), before);
        assert_eq!(queries.count().unwrap(), 25);
        assert_eq!(
            queries.by_tags(&["rust", "go"]).unwrap().len(),
            before
                .iter()
                .filter(|r| r.has_tag("rust") && r.has_tag("go"))
                .count()
        );
    }

    #[test]
    fn test_uniqueness_holds_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memories.log");
        let alice = signer(1);

        let address = {
            let store = FileRecordStore::open_file_backed(&path, StoreConfig::default()).unwrap();
            store
                .store_memory(&alice, "once".into(), tags(&["a"]))
                .unwrap()
        };

        let store = FileRecordStore::open_file_backed(&path, StoreConfig::default()).unwrap();
        assert_eq!(
            store.store_memory(&alice, "once".into(), tags(&["b"])),
            Err(MemoryError::AlreadyExists { address })
        );
        assert_eq!(store.get(&address).unwrap().tags, tags(&["a"]));
        assert_eq!(store.kv_store().len(), 1);
    }

    #[test]
    fn test_namespace_is_part_of_the_address() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memories.log");
        let alice = signer(1);

        let address = {
            let store = FileRecordStore::open_file_backed(&path, StoreConfig::default()).unwrap();
            store.store_memory(&alice, "cid".into(), vec![]).unwrap()
        };

        // Reopening under another namespace derives different addresses
        let config = StoreConfig::new().with_namespace("other");
        let store = FileRecordStore::open_file_backed(&path, config).unwrap();
        assert_ne!(store.derive_address(&alice.authority(), "cid"), address);
        assert!(matches!(
            store.get_by_cid(&alice.authority(), "cid"),
            Err(MemoryError::NotFound { .. })
        ));
        assert!(matches!(
            store.get(&address),
            Err(MemoryError::DataCorruption { .. })
        ));
    }

    #[test]
    fn test_torn_tail_from_crash_is_recovered() {
        init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memories.log");
        let alice = signer(1);

        let address = {
            let store = FileRecordStore::open_file_backed(&path, StoreConfig::default()).unwrap();
            store.store_memory(&alice, "cid".into(), vec![]).unwrap()
        };
        let committed = std::fs::metadata(&path).unwrap().len();

        // A crash mid-append leaves a frame header with no payload
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap();
        file.write_all(&[0x22, 0x00, 0x00, 0x00, b'm']).unwrap();
        drop(file);

        let store = FileRecordStore::open_file_backed(&path, StoreConfig::default()).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), committed);
        assert_eq!(store.get(&address).unwrap().cid, "cid");

        let next = store
            .store_memory(&alice, "after-crash".into(), tags(&["recovered"]))
            .unwrap();
        drop(store);

        let store = FileRecordStore::open_file_backed(&path, StoreConfig::default()).unwrap();
        assert!(store.contains(&address).unwrap());
        assert_eq!(store.get(&next).unwrap().tags, tags(&["recovered"]));
    }

    #[test]
    fn test_damaged_length_is_reported_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memories.log");
        {
            let store = FileRecordStore::open_file_backed(&path, StoreConfig::default()).unwrap();
            store
                .store_memory(&signer(1), "cid".into(), vec![])
                .unwrap();
        }

        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap();
        file.write_all(&[0xFF, 0xFF, 0xFF, 0xFF, b'm']).unwrap();
        drop(file);

        assert!(matches!(
            FileRecordStore::open_file_backed(&path, StoreConfig::default()),
            Err(MemoryError::DataCorruption { .. })
        ));
    }
}
