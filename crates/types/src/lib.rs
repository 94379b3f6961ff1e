use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value reported for a mapped field that none of the data sources contain.
pub const UNKNOWN_VALUE: &str = "Unknown";

/// Pairs a remote field key with the label shown in the pod.
///
/// Example: `MappingEntry { field: "mama_name".into(), field_name: "Mother Name".into() }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MappingEntry {
    /// Key looked up in identity details and registration records
    #[schemars(description = "Remote field key, for example 'mama_name'.")]
    pub field: String,
    /// Human readable label displayed next to the value
    #[schemars(description = "Display label, for example 'Mother Name'.")]
    pub field_name: String,
}

impl MappingEntry {
    pub fn new(field: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            field_name: field_name.into(),
        }
    }
}

/// A single `{name, value}` row rendered by the case panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedItem {
    /// Display label copied from the mapping entry
    pub name: String,
    /// Value found in the first matching source, or [`UNKNOWN_VALUE`]
    pub value: Value,
}

impl ResolvedItem {
    /// True when no source supplied a value for this row.
    pub fn is_unknown(&self) -> bool {
        self.value.as_str() == Some(UNKNOWN_VALUE)
    }
}

/// Action button offered by a pod. No pod emits actions yet; the list is
/// always serialized so panels can rely on its presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub payload: Value,
}

/// Payload returned from a pod's `read_data` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodContent {
    pub items: Vec<ResolvedItem>,
    #[serde(default)]
    pub actions: Vec<PodAction>,
}

impl PodContent {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Parameters sent by the case panel when it asks a pod for data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadParams {
    pub case_id: u64,
}

/// The contact a case belongs to. Contacts created before the contact
/// sync ran may not carry a uuid yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub uuid: Option<String>,
}

impl Contact {
    pub fn with_uuid(uuid: impl Into<String>) -> Self {
        Self { uuid: Some(uuid.into()) }
    }

    /// Returns the uuid when it is present and not blank.
    pub fn identifier(&self) -> Option<&str> {
        self.uuid.as_deref().map(str::trim).filter(|uuid| !uuid.is_empty())
    }
}

/// Remote services a pod talks to.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ServiceId {
    Hub,
    IdentityStore,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hub => "hub",
            Self::IdentityStore => "identity-store",
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pod_content_serializes_items_and_empty_actions() {
        let content = PodContent {
            items: vec![ResolvedItem {
                name: "Mother Name".into(),
                value: json!("Jane"),
            }],
            actions: Vec::new(),
        };

        let value = serde_json::to_value(&content).expect("serialize PodContent");
        assert_eq!(
            value,
            json!({"items": [{"name": "Mother Name", "value": "Jane"}], "actions": []})
        );
    }

    #[test]
    fn mapping_entry_rejects_unknown_keys() {
        let parsed = serde_json::from_str::<MappingEntry>(r#"{"field": "a", "field_name": "A", "label": "x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn contact_identifier_ignores_blank_uuid() {
        assert_eq!(Contact::default().identifier(), None);
        assert_eq!(Contact::with_uuid("  ").identifier(), None);
        assert_eq!(Contact::with_uuid("abc-123").identifier(), Some("abc-123"));
    }

    #[test]
    fn unknown_item_reports_sentinel() {
        let item = ResolvedItem {
            name: "Mother Name".into(),
            value: json!("Unknown"),
        };
        assert!(item.is_unknown());
        let found = ResolvedItem {
            name: "Mother Name".into(),
            value: json!("Jane"),
        };
        assert!(!found.is_unknown());
    }

    #[test]
    fn service_id_displays_short_name() {
        assert_eq!(ServiceId::Hub.to_string(), "hub");
        assert_eq!(ServiceId::IdentityStore.to_string(), "identity-store");
    }
}
