//! First-match field lookup.
//!
//! A pod searches several JSON objects for each configured field. Sources
//! are consulted in priority order and the first one that contains the key
//! wins; later sources are never merged in. Nested objects are not searched
//! implicitly, so callers flatten them into the source list with
//! [`build_sources`].

use pod_api::Record;
use pod_types::UNKNOWN_VALUE;
use serde_json::Value;

/// Key of the sub-object holding registration answers.
pub const REGISTRATION_DATA_KEY: &str = "data";
/// Key of the sub-object holding identity attributes.
pub const IDENTITY_DETAILS_KEY: &str = "details";

/// Return the value of `field` from the first source containing it, or
/// `"Unknown"` when none do.
///
/// A key that is present with a `null` value still counts as a match.
pub fn resolve_field<'a, I>(field: &str, sources: I) -> Value
where
    I: IntoIterator<Item = &'a Record>,
{
    sources
        .into_iter()
        .find_map(|source| source.get(field))
        .cloned()
        .unwrap_or_else(|| Value::String(UNKNOWN_VALUE.to_string()))
}

/// Assemble the ordered source list for a contact.
///
/// Priority: identity `details`, then every registration as returned by the
/// hub, then every registration's `data` object. Sub-objects that are
/// missing or not JSON objects are skipped.
pub fn build_sources<'a>(identity: Option<&'a Record>, registrations: &'a [Record]) -> Vec<&'a Record> {
    let identity_details = identity.and_then(|identity| nested_object(identity, IDENTITY_DETAILS_KEY));
    let registration_data = registrations
        .iter()
        .filter_map(|registration| nested_object(registration, REGISTRATION_DATA_KEY));

    identity_details
        .into_iter()
        .chain(registrations.iter())
        .chain(registration_data)
        .collect()
}

fn nested_object<'a>(record: &'a Record, key: &str) -> Option<&'a Record> {
    record.get(key).and_then(Value::as_object)
}
