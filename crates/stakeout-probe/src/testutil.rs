//! Shared fixtures for the probe tests: a deployment-shaped resource with a
//! spec-ish replica count and a status-ish ready count.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::probes::Probes;
use crate::{InMemoryResourceStore, Resource, ResourceList};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub replicas: i32,
    pub ready_replicas: i32,
}

impl Resource for Deployment {
    const KIND: &'static str = "deployments";

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn set_namespace(&mut self, namespace: &str) {
        self.namespace = namespace.to_string();
    }

    fn labels(&self) -> BTreeMap<String, String> {
        self.labels.clone()
    }
}

#[derive(Debug, Default)]
pub struct DeploymentList {
    items: Vec<Deployment>,
}

impl ResourceList for DeploymentList {
    type Item = Deployment;

    fn items(&self) -> &[Deployment] {
        &self.items
    }

    fn set_items(&mut self, items: Vec<Deployment>) {
        self.items = items;
    }
}

pub fn deployment(namespace: &str, name: &str, replicas: i32) -> Deployment {
    Deployment {
        name: name.to_string(),
        namespace: namespace.to_string(),
        replicas,
        ..Deployment::default()
    }
}

/// A store holding "default/test" at 5 replicas, plus a factory around it.
pub fn seeded_store() -> (Arc<InMemoryResourceStore>, Probes) {
    let store = Arc::new(InMemoryResourceStore::new());
    store
        .insert(&deployment("default", "test", 5))
        .expect("seed store");
    let probes = Probes::new(store.clone());
    (store, probes)
}
