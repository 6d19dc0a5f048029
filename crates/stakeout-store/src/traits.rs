use stakeout_types::{ListOptions, Resource, ResourceId, ResourceList, UpdateOptions};

use crate::error::StoreResult;
use crate::record::RawRecord;

/// Namespace+name addressed resource store.
///
/// This is the erased contract probes close over. It is deliberately
/// object-safe so a process-wide handle can be `Arc<dyn ResourceStore>`;
/// typed access goes through [`ResourceStoreExt`].
///
/// All implementations must satisfy these invariants:
/// - Records are opaque: the store never interprets `data`.
/// - Updates are compare-and-swap: a write whose base version does not
///   match the stored version fails with a conflict and persists nothing.
/// - Every successful write bumps the stored version by one.
/// - Errors are propagated verbatim, never silently ignored.
pub trait ResourceStore: Send + Sync {
    /// Read the record for a single resource.
    fn get_raw(&self, kind: &str, id: &ResourceId) -> StoreResult<RawRecord>;

    /// Read every record of a kind matching the filter, in identity order.
    fn list_raw(&self, kind: &str, opts: &ListOptions) -> StoreResult<Vec<RawRecord>>;

    /// Replace a resource's main body. The record's `version` is the base
    /// version the writer observed at fetch time.
    fn update_raw(&self, kind: &str, record: RawRecord, opts: &UpdateOptions) -> StoreResult<()>;

    /// Replace a resource through the status sub-resource channel. Same
    /// compare-and-swap contract as [`ResourceStore::update_raw`]; backends
    /// that separate observed status from desired state route this write
    /// there.
    fn update_status_raw(
        &self,
        kind: &str,
        record: RawRecord,
        opts: &UpdateOptions,
    ) -> StoreResult<()>;
}

/// Typed convenience over any [`ResourceStore`].
///
/// Blanket-implemented, including for `dyn ResourceStore`, so callers never
/// touch [`RawRecord`] directly. Serialization happens here and only here.
pub trait ResourceStoreExt: ResourceStore {
    /// Fetch the resource addressed by `obj`'s own identity fields into
    /// `obj`, replacing its contents with the latest stored state.
    ///
    /// On error the object is left as it was; whether that prior state is
    /// meaningful is the caller's business.
    fn fetch<R: Resource>(&self, obj: &mut R) -> StoreResult<()> {
        let id = ResourceId::of(obj);
        let record = self.get_raw(R::KIND, &id)?;
        *obj = record.decode()?;
        Ok(())
    }

    /// Fetch a resource by identity, returning it together with the stored
    /// version for a later compare-and-swap write.
    fn fetch_versioned<R: Resource>(&self, id: &ResourceId) -> StoreResult<(R, u64)> {
        let record = self.get_raw(R::KIND, id)?;
        Ok((record.decode()?, record.version))
    }

    /// Populate `list` with every matching resource, replacing its items.
    fn fetch_list<L: ResourceList>(&self, list: &mut L, opts: &ListOptions) -> StoreResult<()> {
        let records = self.list_raw(<L::Item as Resource>::KIND, opts)?;
        let items = records
            .iter()
            .map(RawRecord::decode)
            .collect::<StoreResult<Vec<_>>>()?;
        list.set_items(items);
        Ok(())
    }

    /// Write `obj` back through the main update channel, based on the
    /// version observed at fetch time.
    fn update<R: Resource>(&self, obj: &R, version: u64, opts: &UpdateOptions) -> StoreResult<()> {
        self.update_raw(R::KIND, RawRecord::from_resource(obj, version)?, opts)
    }

    /// Write `obj` back through the status sub-resource channel.
    fn update_status<R: Resource>(
        &self,
        obj: &R,
        version: u64,
        opts: &UpdateOptions,
    ) -> StoreResult<()> {
        self.update_status_raw(R::KIND, RawRecord::from_resource(obj, version)?, opts)
    }
}

impl<S: ResourceStore + ?Sized> ResourceStoreExt for S {}
