//! The store contract consumed by stakeout probes.
//!
//! This crate defines the seam between probes and whatever actually owns
//! resource state: an abstract, namespace+name addressed object store
//! supporting get, filtered list, and two update channels (main body and
//! status sub-resource).
//!
//! # Layers
//!
//! - [`ResourceStore`] — the erased, object-safe contract. Works on
//!   [`RawRecord`] envelopes so a process-wide handle can be an
//!   `Arc<dyn ResourceStore>`.
//! - [`ResourceStoreExt`] — typed convenience over any `ResourceStore`,
//!   doing the serde encode/decode at the boundary.
//! - [`InMemoryResourceStore`] — `HashMap`-based reference backend for
//!   tests and embedding.
//!
//! # Design Rules
//!
//! 1. The store never interprets record payloads; it is a pure key-value
//!    store keyed by (kind, namespace, name).
//! 2. Updates are compare-and-swap on a per-record version; a stale write
//!    fails with [`StoreError::Conflict`] rather than silently losing data.
//! 3. All errors are propagated verbatim, never translated or swallowed.
//! 4. Concurrent use is as safe as the backend's interior locking; the
//!    contract adds no atomicity across separate calls.

pub mod error;
pub mod memory;
pub mod record;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryResourceStore;
pub use record::RawRecord;
pub use traits::{ResourceStore, ResourceStoreExt};
