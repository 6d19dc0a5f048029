//! Foundation types for stakeout.
//!
//! This crate defines the vocabulary shared by the store contract and the
//! probe factory. Every other stakeout crate depends on `stakeout-types`.
//!
//! # Key Types
//!
//! - [`ResourceId`] — the (namespace, name) pair addressing a single resource
//! - [`Resource`] — capability trait for addressable, default-constructible
//!   resource objects
//! - [`ResourceList`] — capability trait for resource collection containers
//! - [`ListOptions`] — namespace / label-selector / limit filter for
//!   collection queries
//! - [`UpdateOptions`] — per-write options (dry-run)

pub mod identity;
pub mod options;
pub mod resource;

pub use identity::ResourceId;
pub use options::{ListOptions, UpdateOptions};
pub use resource::{Resource, ResourceList};
