use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Capability trait for resource objects the store can address.
///
/// A `Resource` is simultaneously default-constructible (probes allocate
/// fresh instances and stamp identity onto them) and addressable (it exposes
/// get/set access to its own name and namespace). Serde bounds exist because
/// the store contract moves resources across an erased boundary as
/// serialized payloads.
///
/// Implementations must treat name and namespace as identity: mutator
/// functions passed to update probes must not change them. That contract is
/// the caller's to uphold; the store does not detect violations.
pub trait Resource: Default + Clone + Serialize + DeserializeOwned + Send + 'static {
    /// Store-wide type name, e.g. `"deployments"`. Resources of different
    /// kinds never collide even under the same namespace and name.
    const KIND: &'static str;

    /// The resource's name.
    fn name(&self) -> &str;

    /// Set the resource's name.
    fn set_name(&mut self, name: &str);

    /// The resource's namespace.
    fn namespace(&self) -> &str;

    /// Set the resource's namespace.
    fn set_namespace(&mut self, namespace: &str);

    /// Labels consulted by list selectors. Unlabeled resources return the
    /// empty map and match only selector-free queries.
    fn labels(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}

/// Capability trait for collection containers populated by list queries.
///
/// List probes allocate a fresh default container (or reuse a caller-owned
/// one) and replace its items wholesale on every invocation; a container
/// never accumulates across calls.
pub trait ResourceList: Default + Send + 'static {
    /// The resource type this container holds.
    type Item: Resource;

    /// The current items, in store iteration order.
    fn items(&self) -> &[Self::Item];

    /// Replace the container's items.
    fn set_items(&mut self, items: Vec<Self::Item>);
}
