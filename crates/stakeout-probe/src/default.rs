//! Process-wide default store handle and the free-function probe API.
//!
//! Test suites that talk to a single store can call [`configure`] once in
//! setup and then build probes through the free functions here instead of
//! threading a [`Probes`] value around. The handle is a single mutable
//! singleton with an init-once, read-many lifecycle; [`configure`] is
//! idempotent and simply replaces the previous handle.
//!
//! Building any probe before [`configure`] has been called panics. An unset
//! handle is a harness defect, not an environment condition worth retrying,
//! so it aborts the run instead of flowing into the probe's error channel.

use std::sync::{Arc, RwLock};

use tracing::debug;

use stakeout_store::{ResourceStore, StoreResult};
use stakeout_types::{ListOptions, Resource, ResourceId, ResourceList, UpdateOptions};

use crate::probes::Probes;

static DEFAULT_STORE: RwLock<Option<Arc<dyn ResourceStore>>> = RwLock::new(None);

/// Install the store handle used by this module's free functions.
///
/// Replaces any previously installed handle. Probes already built keep the
/// handle they were built with.
pub fn configure(store: Arc<dyn ResourceStore>) {
    let mut guard = DEFAULT_STORE.write().expect("lock poisoned");
    debug!(replacing = guard.is_some(), "configuring default store");
    *guard = Some(store);
}

/// A [`Probes`] factory around the current default handle.
///
/// # Panics
///
/// Panics if [`configure`] has not been called in this process.
pub fn probes() -> Probes {
    let guard = DEFAULT_STORE.read().expect("lock poisoned");
    let store = guard
        .as_ref()
        .expect("stakeout default store is not configured; call stakeout_probe::configure() before building probes");
    Probes::new(Arc::clone(store))
}

/// [`Probes::fetch`] against the default store handle.
///
/// # Panics
///
/// Panics if [`configure`] has not been called.
pub fn fetch<'a, R: Resource>(obj: &'a mut R) -> impl FnMut() -> StoreResult<()> + 'a {
    probes().fetch(obj)
}

/// [`Probes::list`] against the default store handle.
///
/// # Panics
///
/// Panics if [`configure`] has not been called.
pub fn list<'a, L: ResourceList>(
    list: &'a mut L,
    opts: ListOptions,
) -> impl FnMut() -> StoreResult<()> + 'a {
    probes().list(list, opts)
}

/// [`Probes::update`] against the default store handle.
///
/// # Panics
///
/// Panics if [`configure`] has not been called.
pub fn update<R, F>(id: ResourceId, mutate: F) -> impl FnMut() -> StoreResult<()>
where
    R: Resource,
    F: FnMut(&mut R),
{
    probes().update(id, mutate)
}

/// [`Probes::update_with`] against the default store handle.
///
/// # Panics
///
/// Panics if [`configure`] has not been called.
pub fn update_with<R, F>(
    id: ResourceId,
    mutate: F,
    opts: UpdateOptions,
) -> impl FnMut() -> StoreResult<()>
where
    R: Resource,
    F: FnMut(&mut R),
{
    probes().update_with(id, mutate, opts)
}

/// [`Probes::update_status`] against the default store handle.
///
/// # Panics
///
/// Panics if [`configure`] has not been called.
pub fn update_status<R, F>(id: ResourceId, mutate: F) -> impl FnMut() -> StoreResult<()>
where
    R: Resource,
    F: FnMut(&mut R),
{
    probes().update_status(id, mutate)
}

/// [`Probes::update_status_with`] against the default store handle.
///
/// # Panics
///
/// Panics if [`configure`] has not been called.
pub fn update_status_with<R, F>(
    id: ResourceId,
    mutate: F,
    opts: UpdateOptions,
) -> impl FnMut() -> StoreResult<()>
where
    R: Resource,
    F: FnMut(&mut R),
{
    probes().update_status_with(id, mutate, opts)
}

/// [`Probes::object`] against the default store handle.
///
/// # Panics
///
/// Panics if [`configure`] has not been called.
pub fn object<R: Resource>(id: ResourceId) -> impl FnMut() -> StoreResult<R> {
    probes().object(id)
}

/// [`Probes::object_list`] against the default store handle.
///
/// # Panics
///
/// Panics if [`configure`] has not been called.
pub fn object_list<L: ResourceList>(opts: ListOptions) -> impl FnMut() -> StoreResult<L> {
    probes().object_list(opts)
}
