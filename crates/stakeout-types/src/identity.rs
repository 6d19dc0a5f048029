use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// The (namespace, name) pair addressing a single resource in the store.
///
/// A `ResourceId` is immutable once captured inside a probe closure: probes
/// hold the identity by value and re-fetch by it on every invocation, so a
/// caller mutating its own copy after building a probe never changes what
/// the probe addresses.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId {
    namespace: String,
    name: String,
}

impl ResourceId {
    /// Create an identity from a namespace and a name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Capture the identity carried by a resource object's own fields.
    pub fn of<R: Resource>(obj: &R) -> Self {
        Self::new(obj.namespace(), obj.name())
    }

    /// The namespace component.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The name component.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stamp this identity onto a resource object's own fields.
    pub fn stamp<R: Resource>(&self, obj: &mut R) {
        obj.set_namespace(&self.namespace);
        obj.set_name(&self.name);
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId({}/{})", self.namespace, self.name)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
