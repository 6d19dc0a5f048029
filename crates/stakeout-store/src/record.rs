use std::collections::BTreeMap;

use stakeout_types::{Resource, ResourceId};

use crate::error::{StoreError, StoreResult};

/// A stored resource as the erased store sees it: identity and labels
/// lifted out for addressing and filtering, payload kept opaque, and a
/// monotonically increasing version for compare-and-swap updates.
///
/// The store never looks inside `data`. The typed layer
/// ([`crate::ResourceStoreExt`]) is the only place serialization happens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRecord {
    /// The resource's (namespace, name) identity.
    pub id: ResourceId,
    /// Labels lifted from the resource at encode time, consulted by list
    /// selectors.
    pub labels: BTreeMap<String, String>,
    /// Version this record is based on. On read, the stored version; on
    /// update, the version the writer observed when it fetched.
    pub version: u64,
    /// The serialized resource payload.
    pub data: Vec<u8>,
}

impl RawRecord {
    /// Encode a resource into a record envelope at a given base version.
    pub fn from_resource<R: Resource>(obj: &R, version: u64) -> StoreResult<Self> {
        let data = serde_json::to_vec(obj).map_err(|e| StoreError::Codec(e.to_string()))?;
        Ok(Self {
            id: ResourceId::of(obj),
            labels: obj.labels(),
            version,
            data,
        })
    }

    /// Decode the payload back into a typed resource.
    pub fn decode<R: Resource>(&self) -> StoreResult<R> {
        serde_json::from_slice(&self.data).map_err(|e| StoreError::Codec(e.to_string()))
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}
