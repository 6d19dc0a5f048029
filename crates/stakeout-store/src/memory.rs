use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use tracing::debug;

use stakeout_types::{ListOptions, Resource, ResourceId, UpdateOptions};

use crate::error::{StoreError, StoreResult};
use crate::record::RawRecord;
use crate::traits::ResourceStore;

type Key = (String, ResourceId);

/// In-memory, HashMap-based resource store.
///
/// Intended for tests and embedding. Records are held behind a `RwLock`
/// and cloned on read, so handing the same store to several probes (or
/// several polling loops) is safe.
///
/// Both update channels persist the full record; this backend cannot split
/// status fields out of an opaque payload, so it distinguishes the channels
/// only by per-channel write counters ([`InMemoryResourceStore::update_writes`],
/// [`InMemoryResourceStore::status_writes`]). Backends with structured
/// storage may route status writes to a true sub-resource.
pub struct InMemoryResourceStore {
    records: RwLock<HashMap<Key, RawRecord>>,
    update_writes: AtomicU64,
    status_writes: AtomicU64,
}

impl InMemoryResourceStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            update_writes: AtomicU64::new(0),
            status_writes: AtomicU64::new(0),
        }
    }

    /// Insert or replace a resource directly, bypassing version checks.
    ///
    /// This is the seeding/external-actor entry point for tests: a fresh
    /// record starts at version 1, replacing an existing one bumps its
    /// version, exactly as if some other client had raced a write in.
    pub fn insert<R: Resource>(&self, obj: &R) -> StoreResult<()> {
        let record = RawRecord::from_resource(obj, 0)?;
        let key = (R::KIND.to_string(), record.id.clone());
        let mut map = self.records.write().expect("lock poisoned");
        let version = map.get(&key).map_or(1, |cur| cur.version + 1);
        debug!(kind = R::KIND, id = %record.id, version, "inserting resource");
        map.insert(key, RawRecord { version, ..record });
        Ok(())
    }

    /// Remove a resource. Returns `true` if it existed.
    pub fn remove<R: Resource>(&self, id: &ResourceId) -> bool {
        let key = (R::KIND.to_string(), id.clone());
        let mut map = self.records.write().expect("lock poisoned");
        map.remove(&key).is_some()
    }

    /// Number of records currently stored, across all kinds.
    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }

    /// Total payload bytes across all stored records.
    pub fn total_bytes(&self) -> u64 {
        self.records
            .read()
            .expect("lock poisoned")
            .values()
            .map(RawRecord::size)
            .sum()
    }

    /// Remove all records and reset the channel counters.
    pub fn clear(&self) {
        self.records.write().expect("lock poisoned").clear();
        self.update_writes.store(0, Ordering::Relaxed);
        self.status_writes.store(0, Ordering::Relaxed);
    }

    /// Number of successful persisted writes through the main channel.
    pub fn update_writes(&self) -> u64 {
        self.update_writes.load(Ordering::Relaxed)
    }

    /// Number of successful persisted writes through the status channel.
    pub fn status_writes(&self) -> u64 {
        self.status_writes.load(Ordering::Relaxed)
    }

    fn apply(&self, kind: &str, record: RawRecord, opts: &UpdateOptions) -> StoreResult<()> {
        let key = (kind.to_string(), record.id.clone());
        let mut map = self.records.write().expect("lock poisoned");
        let current = map.get(&key).ok_or_else(|| StoreError::NotFound {
            kind: kind.to_string(),
            id: record.id.clone(),
        })?;
        if current.version != record.version {
            return Err(StoreError::Conflict {
                kind: kind.to_string(),
                id: record.id.clone(),
                expected: record.version,
                found: current.version,
            });
        }
        if opts.dry_run {
            return Ok(());
        }
        let next = record.version + 1;
        debug!(kind, id = %record.id, version = next, "updating resource");
        map.insert(
            key,
            RawRecord {
                version: next,
                ..record
            },
        );
        Ok(())
    }
}

impl Default for InMemoryResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceStore for InMemoryResourceStore {
    fn get_raw(&self, kind: &str, id: &ResourceId) -> StoreResult<RawRecord> {
        let map = self.records.read().expect("lock poisoned");
        map.get(&(kind.to_string(), id.clone()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                kind: kind.to_string(),
                id: id.clone(),
            })
    }

    fn list_raw(&self, kind: &str, opts: &ListOptions) -> StoreResult<Vec<RawRecord>> {
        let map = self.records.read().expect("lock poisoned");
        let mut matching: Vec<RawRecord> = map
            .iter()
            .filter(|((k, _), _)| k == kind)
            .filter(|((_, id), record)| opts.matches(id.namespace(), &record.labels))
            .map(|(_, record)| record.clone())
            .collect();
        matching.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(limit) = opts.limit {
            matching.truncate(limit);
        }
        Ok(matching)
    }

    fn update_raw(&self, kind: &str, record: RawRecord, opts: &UpdateOptions) -> StoreResult<()> {
        self.apply(kind, record, opts)?;
        if !opts.dry_run {
            self.update_writes.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }

    fn update_status_raw(
        &self,
        kind: &str,
        record: RawRecord,
        opts: &UpdateOptions,
    ) -> StoreResult<()> {
        self.apply(kind, record, opts)?;
        if !opts.dry_run {
            self.status_writes.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryResourceStore")
            .field("record_count", &self.len())
            .field("update_writes", &self.update_writes())
            .field("status_writes", &self.status_writes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Serialize};
    use stakeout_types::ResourceList;

    use super::*;
    use crate::traits::ResourceStoreExt;

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Deployment {
        name: String,
        namespace: String,
        labels: BTreeMap<String, String>,
        replicas: i32,
        ready_replicas: i32,
    }

    impl Resource for Deployment {
        const KIND: &'static str = "deployments";

        fn name(&self) -> &str {
            &self.name
        }

        fn set_name(&mut self, name: &str) {
            self.name = name.to_string();
        }

        fn namespace(&self) -> &str {
            &self.namespace
        }

        fn set_namespace(&mut self, namespace: &str) {
            self.namespace = namespace.to_string();
        }

        fn labels(&self) -> BTreeMap<String, String> {
            self.labels.clone()
        }
    }

    #[derive(Debug, Default)]
    struct DeploymentList {
        items: Vec<Deployment>,
    }

    impl ResourceList for DeploymentList {
        type Item = Deployment;

        fn items(&self) -> &[Deployment] {
            &self.items
        }

        fn set_items(&mut self, items: Vec<Deployment>) {
            self.items = items;
        }
    }

    fn deployment(namespace: &str, name: &str, replicas: i32) -> Deployment {
        Deployment {
            name: name.to_string(),
            namespace: namespace.to_string(),
            replicas,
            ..Deployment::default()
        }
    }

    fn labeled(namespace: &str, name: &str, pairs: &[(&str, &str)]) -> Deployment {
        let mut d = deployment(namespace, name, 1);
        d.labels = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        d
    }

    // -----------------------------------------------------------------------
    // Get / insert
    // -----------------------------------------------------------------------

    #[test]
    fn insert_and_fetch() {
        let store = InMemoryResourceStore::new();
        store.insert(&deployment("default", "test", 5)).unwrap();

        let mut d = deployment("default", "test", 0);
        store.fetch(&mut d).unwrap();
        assert_eq!(d.replicas, 5);
    }

    #[test]
    fn fetch_missing_is_not_found() {
        let store = InMemoryResourceStore::new();
        let mut d = deployment("default", "ghost", 0);
        let err = store.fetch(&mut d).unwrap_err();
        assert!(err.is_not_found());
        // The caller's object is untouched on a failed fetch.
        assert_eq!(d.replicas, 0);
    }

    #[test]
    fn insert_starts_at_version_one_and_bumps() {
        let store = InMemoryResourceStore::new();
        let id = ResourceId::new("default", "test");
        store.insert(&deployment("default", "test", 1)).unwrap();
        assert_eq!(store.get_raw(Deployment::KIND, &id).unwrap().version, 1);

        store.insert(&deployment("default", "test", 2)).unwrap();
        assert_eq!(store.get_raw(Deployment::KIND, &id).unwrap().version, 2);
    }

    #[test]
    fn kinds_do_not_collide() {
        #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
        struct Service {
            name: String,
            namespace: String,
            port: u16,
        }

        impl Resource for Service {
            const KIND: &'static str = "services";

            fn name(&self) -> &str {
                &self.name
            }
            fn set_name(&mut self, name: &str) {
                self.name = name.to_string();
            }
            fn namespace(&self) -> &str {
                &self.namespace
            }
            fn set_namespace(&mut self, namespace: &str) {
                self.namespace = namespace.to_string();
            }
        }

        let store = InMemoryResourceStore::new();
        store.insert(&deployment("default", "test", 5)).unwrap();

        let mut svc = Service {
            name: "test".to_string(),
            namespace: "default".to_string(),
            port: 0,
        };
        assert!(store.fetch(&mut svc).unwrap_err().is_not_found());
    }

    // -----------------------------------------------------------------------
    // Updates
    // -----------------------------------------------------------------------

    #[test]
    fn update_persists_and_bumps_version() {
        let store = InMemoryResourceStore::new();
        let id = ResourceId::new("default", "test");
        store.insert(&deployment("default", "test", 1)).unwrap();

        let (mut d, version): (Deployment, u64) = store.fetch_versioned(&id).unwrap();
        d.replicas = 3;
        store.update(&d, version, &UpdateOptions::default()).unwrap();

        let (back, new_version): (Deployment, u64) = store.fetch_versioned(&id).unwrap();
        assert_eq!(back.replicas, 3);
        assert_eq!(new_version, version + 1);
        assert_eq!(store.update_writes(), 1);
        assert_eq!(store.status_writes(), 0);
    }

    #[test]
    fn stale_update_is_a_conflict() {
        let store = InMemoryResourceStore::new();
        let id = ResourceId::new("default", "test");
        store.insert(&deployment("default", "test", 1)).unwrap();

        let (mut d, version): (Deployment, u64) = store.fetch_versioned(&id).unwrap();
        // Another actor writes in between.
        store.insert(&deployment("default", "test", 9)).unwrap();

        d.replicas = 3;
        let err = store
            .update(&d, version, &UpdateOptions::default())
            .unwrap_err();
        assert!(err.is_conflict());

        // The racing write survived.
        let (back, _): (Deployment, u64) = store.fetch_versioned(&id).unwrap();
        assert_eq!(back.replicas, 9);
        assert_eq!(store.update_writes(), 0);
    }

    #[test]
    fn update_missing_is_not_found() {
        let store = InMemoryResourceStore::new();
        let d = deployment("default", "ghost", 1);
        let err = store.update(&d, 1, &UpdateOptions::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn dry_run_checks_but_does_not_persist() {
        let store = InMemoryResourceStore::new();
        let id = ResourceId::new("default", "test");
        store.insert(&deployment("default", "test", 1)).unwrap();

        let (mut d, version): (Deployment, u64) = store.fetch_versioned(&id).unwrap();
        d.replicas = 42;
        store.update(&d, version, &UpdateOptions::dry_run()).unwrap();

        let (back, back_version): (Deployment, u64) = store.fetch_versioned(&id).unwrap();
        assert_eq!(back.replicas, 1);
        assert_eq!(back_version, version);
        assert_eq!(store.update_writes(), 0);

        // Conflicts still surface under dry-run.
        let err = store
            .update(&d, version + 7, &UpdateOptions::dry_run())
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn status_channel_is_counted_separately() {
        let store = InMemoryResourceStore::new();
        let id = ResourceId::new("default", "test");
        store.insert(&deployment("default", "test", 1)).unwrap();

        let (mut d, version): (Deployment, u64) = store.fetch_versioned(&id).unwrap();
        d.ready_replicas = 1;
        store
            .update_status(&d, version, &UpdateOptions::default())
            .unwrap();

        assert_eq!(store.status_writes(), 1);
        assert_eq!(store.update_writes(), 0);
        let (back, _): (Deployment, u64) = store.fetch_versioned(&id).unwrap();
        assert_eq!(back.ready_replicas, 1);
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    #[test]
    fn list_filters_by_namespace_and_sorts_by_identity() {
        let store = InMemoryResourceStore::new();
        store.insert(&deployment("default", "b", 1)).unwrap();
        store.insert(&deployment("default", "a", 1)).unwrap();
        store.insert(&deployment("other", "c", 1)).unwrap();

        let mut list = DeploymentList::default();
        store
            .fetch_list(&mut list, &ListOptions::in_namespace("default"))
            .unwrap();
        let names: Vec<&str> = list.items().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn list_applies_selector_and_limit() {
        let store = InMemoryResourceStore::new();
        store
            .insert(&labeled("default", "web-1", &[("app", "web")]))
            .unwrap();
        store
            .insert(&labeled("default", "web-2", &[("app", "web")]))
            .unwrap();
        store
            .insert(&labeled("default", "db-1", &[("app", "db")]))
            .unwrap();

        let mut list = DeploymentList::default();
        let opts = ListOptions::default().with_label("app", "web");
        store.fetch_list(&mut list, &opts).unwrap();
        assert_eq!(list.items().len(), 2);

        store
            .fetch_list(&mut list, &opts.clone().with_limit(1))
            .unwrap();
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].name, "web-1");
    }

    #[test]
    fn list_replaces_items_instead_of_accumulating() {
        let store = InMemoryResourceStore::new();
        store.insert(&deployment("default", "a", 1)).unwrap();

        let mut list = DeploymentList::default();
        store.fetch_list(&mut list, &ListOptions::default()).unwrap();
        store.fetch_list(&mut list, &ListOptions::default()).unwrap();
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn empty_list_is_ok_not_an_error() {
        let store = InMemoryResourceStore::new();
        let mut list = DeploymentList::default();
        store.fetch_list(&mut list, &ListOptions::default()).unwrap();
        assert!(list.items().is_empty());
    }

    // -----------------------------------------------------------------------
    // Housekeeping
    // -----------------------------------------------------------------------

    #[test]
    fn total_bytes_tracks_payload_sizes() {
        let store = InMemoryResourceStore::new();
        assert_eq!(store.total_bytes(), 0);

        store.insert(&deployment("default", "a", 1)).unwrap();
        store.insert(&deployment("default", "b", 1)).unwrap();

        let id = ResourceId::new("default", "a");
        let expected = store.get_raw(Deployment::KIND, &id).unwrap().size()
            + store
                .get_raw(Deployment::KIND, &ResourceId::new("default", "b"))
                .unwrap()
                .size();
        assert_eq!(store.total_bytes(), expected);

        store.clear();
        assert_eq!(store.total_bytes(), 0);
    }

    #[test]
    fn remove_and_clear() {
        let store = InMemoryResourceStore::new();
        store.insert(&deployment("default", "test", 1)).unwrap();
        assert_eq!(store.len(), 1);

        assert!(store.remove::<Deployment>(&ResourceId::new("default", "test")));
        assert!(!store.remove::<Deployment>(&ResourceId::new("default", "test")));
        assert!(store.is_empty());

        store.insert(&deployment("default", "test", 1)).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.update_writes(), 0);
    }
}
