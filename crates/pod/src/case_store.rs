//! Case-to-contact lookup.
//!
//! The host application owns cases; pods only need the contact behind a
//! case. [`CaseStore`] is that seam. [`MemoryCaseStore`] is a map-backed
//! implementation used by the CLI (loaded from a JSON fixture) and tests.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use pod_types::Contact;
use tracing::debug;

use crate::PodError;

/// Resolves a case identifier to the contact the case is about.
#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Returns [`PodError::CaseNotFound`] when no case has this id.
    async fn contact_for_case(&self, case_id: u64) -> Result<Contact, PodError>;
}

/// In-memory [`CaseStore`].
///
/// The JSON fixture format maps case ids to contacts:
///
/// ```json
/// {"42": {"uuid": "0f6c..."}, "43": {"uuid": null}}
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCaseStore {
    cases: HashMap<u64, Contact>,
}

impl MemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case(mut self, case_id: u64, contact: Contact) -> Self {
        self.cases.insert(case_id, contact);
        self
    }

    pub fn from_json_str(content: &str) -> Result<Self, PodError> {
        let raw: HashMap<String, Contact> = serde_json::from_str(content).map_err(|error| PodError::CaseStore {
            reason: format!("invalid case fixture: {}", error),
        })?;

        let mut cases = HashMap::with_capacity(raw.len());
        for (key, contact) in raw {
            let case_id = key.trim().parse::<u64>().map_err(|_| PodError::CaseStore {
                reason: format!("invalid case id '{}' in case fixture", key),
            })?;
            cases.insert(case_id, contact);
        }
        Ok(Self { cases })
    }

    pub fn from_path(path: &Path) -> Result<Self, PodError> {
        let content = fs::read_to_string(path).map_err(|error| PodError::CaseStore {
            reason: format!("failed to read case fixture {}: {}", path.display(), error),
        })?;
        let store = Self::from_json_str(&content)?;
        debug!(path = %path.display(), cases = store.len(), "Loaded case fixture");
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[async_trait]
impl CaseStore for MemoryCaseStore {
    async fn contact_for_case(&self, case_id: u64) -> Result<Contact, PodError> {
        self.cases
            .get(&case_id)
            .cloned()
            .ok_or(PodError::CaseNotFound { case_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_known_cases() {
        let store = MemoryCaseStore::new().with_case(42, Contact::with_uuid("abc-123"));
        let contact = store.contact_for_case(42).await.expect("case exists");
        assert_eq!(contact.identifier(), Some("abc-123"));
    }

    #[tokio::test]
    async fn unknown_case_is_an_error() {
        let store = MemoryCaseStore::new();
        let error = store.contact_for_case(7).await.expect_err("no such case");
        assert!(matches!(error, PodError::CaseNotFound { case_id: 7 }));
    }

    #[test]
    fn parses_fixture_with_missing_uuids() {
        let store = MemoryCaseStore::from_json_str(r#"{"1": {"uuid": "abc"}, "2": {"uuid": null}, "3": {}}"#)
            .expect("parse fixture");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn rejects_non_numeric_case_ids() {
        let error = MemoryCaseStore::from_json_str(r#"{"case-1": {"uuid": "abc"}}"#).expect_err("bad key");
        assert!(error.to_string().contains("case-1"), "{error}");
    }
}
