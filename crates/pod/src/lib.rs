//! Registration pod for the case-management panel.
//!
//! Given a case, the pod looks up the case's contact, fetches that contact's
//! registrations from the hub and (optionally) their identity from the
//! identity store, and renders one `{name, value}` row per configured field.
//!
//! - [`config`]: typed, validated pod configuration
//! - [`resolver`]: first-match field lookup across data sources
//! - [`RegistrationPod`]: the `read_data` request handler
//! - [`PodRegistry`] / [`REGISTRATION_POD`]: plugin descriptor and registry

pub mod case_store;
pub mod config;
mod error;
mod plugin;
mod pod;
pub mod resolver;

pub use case_store::{CaseStore, MemoryCaseStore};
pub use config::{RegistrationPodConfig, ServiceConfig};
pub use error::{PodError, RegistryError};
pub use plugin::{PodDescriptor, PodFactory, PodRegistry, REGISTRATION_POD};
pub use pod::{Pod, RegistrationPod};
pub use resolver::{build_sources, resolve_field};
