use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::ApiError;

/// A JSON object returned by a remote service.
pub type Record = Map<String, Value>;

/// Anything that can list registrations for a contact.
#[async_trait]
pub trait RegistrationSource: Send + Sync {
    /// List registrations whose `filter_field` equals `contact_id`.
    async fn get_registrations(&self, filter_field: &str, contact_id: &str) -> Result<Vec<Record>, ApiError>;
}

/// Anything that can look up a single identity.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// Fetch the identity with `identity_id`, or `None` when it does not exist.
    async fn get_identity(&self, identity_id: &str) -> Result<Option<Record>, ApiError>;
}
