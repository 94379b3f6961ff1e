//! Plugin descriptors and the registry hosts build pods from.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use schemars::schema_for;
use serde_json::{Value, json};
use tracing::debug;

use crate::case_store::CaseStore;
use crate::config::{RegistrationPodConfig, config_from_value};
use crate::{Pod, PodError, RegistrationPod, RegistryError};

/// Builds a pod from raw host configuration.
pub type PodFactory = fn(Value, Arc<dyn CaseStore>) -> Result<Box<dyn Pod>, PodError>;

/// Static metadata a host needs to offer and construct a pod.
pub struct PodDescriptor {
    /// Unique plugin identifier, for example `casepropods.family_connect_registration`.
    pub identifier: &'static str,
    /// Label used by the host to refer to the pod type.
    pub label: &'static str,
    /// Title shown above the panel.
    pub title: &'static str,
    config_schema: fn() -> Value,
    factory: PodFactory,
}

impl PodDescriptor {
    /// JSON Schema describing the configuration this pod accepts.
    pub fn config_schema(&self) -> Value {
        (self.config_schema)()
    }

    /// Parse `config`, validate it, and construct the pod.
    pub fn build(&self, config: Value, cases: Arc<dyn CaseStore>) -> Result<Box<dyn Pod>, PodError> {
        (self.factory)(config, cases)
    }

    /// Summary suitable for listing pods to an operator.
    pub fn summary(&self) -> Value {
        json!({
            "identifier": self.identifier,
            "label": self.label,
            "title": self.title,
            "config_schema": self.config_schema(),
        })
    }
}

impl fmt::Debug for PodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PodDescriptor")
            .field("identifier", &self.identifier)
            .field("label", &self.label)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Descriptor of the registration pod.
pub static REGISTRATION_POD: PodDescriptor = PodDescriptor {
    identifier: "casepropods.family_connect_registration",
    label: "family_connect_registration_pod",
    title: "Registration Pod",
    config_schema: registration_config_schema,
    factory: build_registration_pod,
};

fn registration_config_schema() -> Value {
    schema_for!(RegistrationPodConfig).to_value()
}

fn build_registration_pod(config: Value, cases: Arc<dyn CaseStore>) -> Result<Box<dyn Pod>, PodError> {
    let config = config_from_value(config)?;
    Ok(Box::new(RegistrationPod::from_config(config, cases)?))
}

/// Registered pod descriptors, kept in registration order.
#[derive(Debug, Default)]
pub struct PodRegistry {
    descriptors: IndexMap<&'static str, &'static PodDescriptor>,
}

impl PodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every pod shipped in this crate.
    pub fn with_builtin_pods() -> Self {
        let mut registry = Self::new();
        registry.descriptors.insert(REGISTRATION_POD.identifier, &REGISTRATION_POD);
        registry
    }

    pub fn register(&mut self, descriptor: &'static PodDescriptor) -> Result<(), RegistryError> {
        if self.descriptors.contains_key(descriptor.identifier) {
            return Err(RegistryError::DuplicatePod {
                identifier: descriptor.identifier.to_string(),
            });
        }
        debug!(identifier = descriptor.identifier, "Registered pod");
        self.descriptors.insert(descriptor.identifier, descriptor);
        Ok(())
    }

    pub fn get(&self, identifier: &str) -> Result<&'static PodDescriptor, RegistryError> {
        self.descriptors
            .get(identifier)
            .copied()
            .ok_or_else(|| RegistryError::UnknownPod {
                identifier: identifier.to_string(),
            })
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &'static PodDescriptor> + '_ {
        self.descriptors.values().copied()
    }

    /// Look up `identifier` and construct the pod from raw configuration.
    pub fn build(&self, identifier: &str, config: Value, cases: Arc<dyn CaseStore>) -> Result<Box<dyn Pod>, PodError> {
        let descriptor = self.get(identifier)?;
        descriptor.build(config, cases)
    }
}
