use std::sync::Arc;

use tracing::debug;

use stakeout_store::{ResourceStore, ResourceStoreExt, StoreResult};
use stakeout_types::{ListOptions, Resource, ResourceId, ResourceList, UpdateOptions};

/// Factory for retryable store probes.
///
/// A `Probes` value closes over one store handle and builds zero-argument
/// closures around it. Every closure re-fetches current state from the
/// store on every invocation; none of them assume a prior call left
/// anything fresh behind. Store errors come back verbatim as the closure's
/// result so the polling engine can decide whether to keep going.
///
/// The factory adds no locking and no atomicity across a probe's internal
/// fetch-then-write sequence; a concurrent writer racing an update probe
/// surfaces as a conflict error on that call, and the remediation is simply
/// the next call, which starts from a fresh fetch.
#[derive(Clone)]
pub struct Probes {
    store: Arc<dyn ResourceStore>,
}

impl Probes {
    /// Create a factory around an explicit store handle.
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    /// The store handle this factory closes over.
    pub fn store(&self) -> Arc<dyn ResourceStore> {
        Arc::clone(&self.store)
    }

    /// Probe that re-fetches the resource addressed by `obj`'s own identity
    /// fields into `obj` on every invocation.
    ///
    /// On `Err` the object keeps whatever it held before that call; whether
    /// that state is still meaningful is store-implementation-defined.
    pub fn fetch<'a, R: Resource>(&self, obj: &'a mut R) -> impl FnMut() -> StoreResult<()> + 'a {
        let store = self.store();
        move || store.fetch(obj)
    }

    /// Probe that repopulates `list` with the resources matching `opts` on
    /// every invocation, replacing its items wholesale.
    pub fn list<'a, L: ResourceList>(
        &self,
        list: &'a mut L,
        opts: ListOptions,
    ) -> impl FnMut() -> StoreResult<()> + 'a {
        let store = self.store();
        move || store.fetch_list(list, &opts)
    }

    /// Probe that, per invocation, fetches the identified resource fresh,
    /// applies `mutate` to it exactly once, and writes it back through the
    /// main update channel.
    ///
    /// The mutator must not touch the resource's name or namespace.
    pub fn update<R, F>(&self, id: ResourceId, mutate: F) -> impl FnMut() -> StoreResult<()>
    where
        R: Resource,
        F: FnMut(&mut R),
    {
        self.update_with(id, mutate, UpdateOptions::default())
    }

    /// [`Probes::update`] with explicit write options.
    pub fn update_with<R, F>(
        &self,
        id: ResourceId,
        mut mutate: F,
        opts: UpdateOptions,
    ) -> impl FnMut() -> StoreResult<()>
    where
        R: Resource,
        F: FnMut(&mut R),
    {
        let store = self.store();
        move || {
            let (mut obj, version): (R, u64) = store.fetch_versioned(&id)?;
            mutate(&mut obj);
            store.update(&obj, version, &opts)?;
            debug!(kind = R::KIND, id = %id, "update probe wrote resource");
            Ok(())
        }
    }

    /// Probe identical to [`Probes::update`] except the write goes through
    /// the status sub-resource channel.
    pub fn update_status<R, F>(&self, id: ResourceId, mutate: F) -> impl FnMut() -> StoreResult<()>
    where
        R: Resource,
        F: FnMut(&mut R),
    {
        self.update_status_with(id, mutate, UpdateOptions::default())
    }

    /// [`Probes::update_status`] with explicit write options.
    pub fn update_status_with<R, F>(
        &self,
        id: ResourceId,
        mut mutate: F,
        opts: UpdateOptions,
    ) -> impl FnMut() -> StoreResult<()>
    where
        R: Resource,
        F: FnMut(&mut R),
    {
        let store = self.store();
        move || {
            let (mut obj, version): (R, u64) = store.fetch_versioned(&id)?;
            mutate(&mut obj);
            store.update_status(&obj, version, &opts)?;
            debug!(kind = R::KIND, id = %id, "status probe wrote resource");
            Ok(())
        }
    }

    /// Probe that, per invocation, allocates a fresh default instance,
    /// stamps the identity onto it, fetches current state into it, and
    /// returns it. Results from one call never leak into the next.
    pub fn object<R: Resource>(&self, id: ResourceId) -> impl FnMut() -> StoreResult<R> {
        let store = self.store();
        move || {
            let mut obj = R::default();
            id.stamp(&mut obj);
            store.fetch(&mut obj)?;
            Ok(obj)
        }
    }

    /// List analogue of [`Probes::object`]: a fresh collection container
    /// per invocation, populated via the filtered query.
    pub fn object_list<L: ResourceList>(&self, opts: ListOptions) -> impl FnMut() -> StoreResult<L> {
        let store = self.store();
        move || {
            let mut list = L::default();
            store.fetch_list(&mut list, &opts)?;
            Ok(list)
        }
    }
}

impl std::fmt::Debug for Probes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Probes").finish_non_exhaustive()
    }
}
