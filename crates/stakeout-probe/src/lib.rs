//! Retryable store probes for poll-until-true test assertions.
//!
//! A probe is a zero-argument closure that performs exactly one store
//! round-trip per invocation and reports the outcome. Probes are built once
//! and then handed to an external polling engine (an "eventually"-style
//! assertion loop) that invokes them until they succeed or a timeout
//! elapses. The probes themselves never retry, never back off, and hold no
//! state between invocations beyond the caller-owned object they populate.
//!
//! # Two API surfaces
//!
//! - [`Probes`] — the factory proper, constructed with an explicit
//!   `Arc<dyn ResourceStore>`. Prefer this form.
//! - Free functions ([`configure`], [`fetch`], [`update`], ...) bound to a
//!   process-wide default store handle, for test suites that configure one
//!   store up front. Building a probe before [`configure`] has been called
//!   panics: a misconfigured harness should stop, not retry.
//!
//! # Example
//!
//! ```
//! # use std::sync::Arc;
//! # use serde::{Deserialize, Serialize};
//! # use stakeout_probe::{Probes, InMemoryResourceStore, ResourceId, Resource};
//! #[derive(Clone, Debug, Default, Serialize, Deserialize)]
//! struct Deployment {
//!     name: String,
//!     namespace: String,
//!     replicas: i32,
//! }
//!
//! impl Resource for Deployment {
//!     const KIND: &'static str = "deployments";
//!     fn name(&self) -> &str { &self.name }
//!     fn set_name(&mut self, name: &str) { self.name = name.to_string(); }
//!     fn namespace(&self) -> &str { &self.namespace }
//!     fn set_namespace(&mut self, ns: &str) { self.namespace = ns.to_string(); }
//! }
//!
//! let store = Arc::new(InMemoryResourceStore::new());
//! store.insert(&Deployment {
//!     name: "test".into(),
//!     namespace: "default".into(),
//!     replicas: 5,
//! }).unwrap();
//!
//! let probes = Probes::new(store);
//! let mut probe = probes.object::<Deployment>(ResourceId::new("default", "test"));
//! // A polling engine would call this until it returns Ok.
//! assert_eq!(probe().unwrap().replicas, 5);
//! ```

pub mod default;
pub mod probes;

pub use default::{
    configure, fetch, list, object, object_list, update, update_status, update_status_with,
    update_with,
};
pub use probes::Probes;

// Re-export the vocabulary callers need so a test suite can depend on this
// crate alone.
pub use stakeout_store::{
    InMemoryResourceStore, RawRecord, ResourceStore, ResourceStoreExt, StoreError, StoreResult,
};
pub use stakeout_types::{ListOptions, Resource, ResourceId, ResourceList, UpdateOptions};

#[cfg(test)]
pub(crate) mod testutil;
