use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Filter options for collection queries.
///
/// An empty `ListOptions` matches every resource of the queried kind. Each
/// populated field narrows the result: namespace scoping, label selection
/// (every selector pair must be present on the resource), and a result
/// count limit applied after filtering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Restrict results to a single namespace.
    pub namespace: Option<String>,
    /// Label pairs a resource must all carry to match.
    pub selector: BTreeMap<String, String>,
    /// Maximum number of results, applied after filtering.
    pub limit: Option<usize>,
}

impl ListOptions {
    /// Options scoped to a single namespace.
    pub fn in_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..Self::default()
        }
    }

    /// Add a label selector pair.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.selector.insert(key.into(), value.into());
        self
    }

    /// Cap the number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a resource with the given namespace and labels matches.
    ///
    /// The limit is not consulted here; it is the store's job to truncate
    /// after filtering.
    pub fn matches(&self, namespace: &str, labels: &BTreeMap<String, String>) -> bool {
        if let Some(ns) = &self.namespace {
            if ns != namespace {
                return false;
            }
        }
        self.selector
            .iter()
            .all(|(k, v)| labels.get(k) == Some(v))
    }
}

/// Per-write options for update operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOptions {
    /// Perform every check the write would perform (existence, version
    /// conflict) but persist nothing.
    pub dry_run: bool,
}

impl UpdateOptions {
    /// Options for a checked-but-not-persisted write.
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }
}
