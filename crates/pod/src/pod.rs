use std::sync::Arc;

use async_trait::async_trait;
use pod_api::{HubApiClient, IdentitySource, IdentityStoreApiClient, RegistrationSource};
use pod_types::{PodContent, ReadParams, ResolvedItem};
use tracing::{debug, info};

use crate::case_store::CaseStore;
use crate::config::RegistrationPodConfig;
use crate::resolver::{build_sources, resolve_field};
use crate::{PodDescriptor, PodError, REGISTRATION_POD};

/// A panel plugin that renders data for a case.
#[async_trait]
pub trait Pod: Send + Sync {
    /// Static metadata for this kind of pod.
    fn descriptor(&self) -> &'static PodDescriptor;

    /// Produce the rows shown in the panel for `params.case_id`.
    async fn read_data(&self, params: ReadParams) -> Result<PodContent, PodError>;
}

/// Shows hub registration and identity fields for the contact behind a case.
pub struct RegistrationPod {
    config: RegistrationPodConfig,
    cases: Arc<dyn CaseStore>,
    registrations: Arc<dyn RegistrationSource>,
    identities: Option<Arc<dyn IdentitySource>>,
}

impl RegistrationPod {
    /// Build a pod talking to the hub and identity store named in `config`.
    pub fn from_config(config: RegistrationPodConfig, cases: Arc<dyn CaseStore>) -> Result<Self, PodError> {
        let timeout = config.timeout();
        let hub = HubApiClient::new(&config.hub.url, &config.hub.token, timeout)?;
        let identities = match &config.identity_store {
            Some(service) => {
                let client = IdentityStoreApiClient::new(&service.url, &service.token, timeout)?;
                Some(Arc::new(client) as Arc<dyn IdentitySource>)
            }
            None => None,
        };
        Ok(Self::with_sources(config, cases, Arc::new(hub), identities))
    }

    /// Build a pod over explicit data sources.
    pub fn with_sources(
        config: RegistrationPodConfig,
        cases: Arc<dyn CaseStore>,
        registrations: Arc<dyn RegistrationSource>,
        identities: Option<Arc<dyn IdentitySource>>,
    ) -> Self {
        Self {
            config,
            cases,
            registrations,
            identities,
        }
    }

    pub fn config(&self) -> &RegistrationPodConfig {
        &self.config
    }
}

#[async_trait]
impl Pod for RegistrationPod {
    fn descriptor(&self) -> &'static PodDescriptor {
        &REGISTRATION_POD
    }

    async fn read_data(&self, params: ReadParams) -> Result<PodContent, PodError> {
        let contact = self.cases.contact_for_case(params.case_id).await?;
        let Some(contact_id) = contact.identifier() else {
            debug!(case_id = params.case_id, "Contact has no uuid; returning empty content");
            return Ok(PodContent::empty());
        };

        let registrations = self
            .registrations
            .get_registrations(&self.config.contact_id_fieldname, contact_id)
            .await?;

        let identity = match &self.identities {
            Some(identities) => identities.get_identity(contact_id).await?,
            None => None,
        };

        let sources = build_sources(identity.as_ref(), &registrations);
        let items: Vec<ResolvedItem> = self
            .config
            .field_mapping
            .iter()
            .map(|entry| ResolvedItem {
                name: entry.field_name.clone(),
                value: resolve_field(&entry.field, sources.iter().copied()),
            })
            .collect();

        info!(
            case_id = params.case_id,
            registrations = registrations.len(),
            identity = identity.is_some(),
            unknown = items.iter().filter(|item| item.is_unknown()).count(),
            "Read registration pod data"
        );

        Ok(PodContent {
            items,
            actions: Vec::new(),
        })
    }
}
