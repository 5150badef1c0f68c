// Policy document model
// The document is keyed by platform identifier; each value describes one platform's update policy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{GateError, GateResult};

/// One platform's slice of the policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Lowest version allowed to run without being blocked.
    pub minimum: String,
    /// Newest published version.
    pub latest: String,
    /// Where the user goes to get the update.
    pub url: String,
    /// Kill-switch; `false` puts the platform into maintenance.
    pub enabled: bool,
}

/// The full multi-platform policy document.
///
/// Entries are held as raw JSON and only decoded when a platform is selected,
/// so a stray key never makes the whole document unusable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyDocument {
    entries: BTreeMap<String, Value>,
}

impl PolicyDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder helper used by hosts and tests assembling a document in code.
    pub fn with_record(mut self, platform: impl Into<String>, record: PolicyRecord) -> Self {
        self.insert(platform, record);
        self
    }

    pub fn insert(&mut self, platform: impl Into<String>, record: PolicyRecord) {
        let value = json!({
            "minimum": record.minimum,
            "latest": record.latest,
            "url": record.url,
            "enabled": record.enabled,
        });
        self.entries.insert(platform.into(), value);
    }

    /// Interpret a JSON value as a policy document. Only JSON objects qualify.
    pub fn from_value(value: Value) -> GateResult<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                entries: map.into_iter().collect(),
            }),
            other => Err(GateError::malformed(
                "policy document",
                format!("expected a JSON object, got {}", json_kind(&other)),
            )),
        }
    }

    /// Parse a serialized document, e.g. the cached copy.
    pub fn from_json(raw: &str) -> GateResult<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| GateError::malformed("policy document", e.to_string()))?;
        Self::from_value(value)
    }

    pub fn to_json(&self) -> GateResult<String> {
        serde_json::to_string(&self.entries)
            .map_err(|e| GateError::malformed("policy document", e.to_string()))
    }

    pub fn contains(&self, platform: &str) -> bool {
        self.entries.contains_key(platform)
    }

    /// Decode the record for `platform`, if the document has one.
    pub fn record(&self, platform: &str) -> GateResult<Option<PolicyRecord>> {
        match self.entries.get(platform) {
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
                GateError::malformed(format!("policy record '{platform}'"), e.to_string())
            }),
            None => Ok(None),
        }
    }

    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ios() -> PolicyRecord {
        PolicyRecord {
            minimum: "1.0.0".into(),
            latest: "2.4.5".into(),
            url: "http://example.com".into(),
            enabled: true,
        }
    }

    #[test]
    fn decodes_matching_record() {
        let doc = PolicyDocument::from_value(json!({
            "ios": {"minimum": "1.0.0", "latest": "2.4.5", "enabled": true, "url": "http://example.com"},
            "_comment": "published by release tooling"
        }))
        .unwrap();

        assert_eq!(doc.record("ios").unwrap(), Some(ios()));
        assert_eq!(doc.record("android").unwrap(), None);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn bad_record_is_malformed_only_when_selected() {
        let doc = PolicyDocument::from_value(json!({
            "ios": {"minimum": "1.0.0"},
            "android": {"minimum": "1.0.0", "latest": "1.0.0", "enabled": true, "url": "u"}
        }))
        .unwrap();

        assert!(doc.record("android").unwrap().is_some());
        assert!(matches!(doc.record("ios"), Err(GateError::Malformed { .. })));
    }

    #[test]
    fn rejects_non_object_documents() {
        for raw in ["[]", "null", "\"ios\"", "42", "not json"] {
            let err = PolicyDocument::from_json(raw).unwrap_err();
            assert!(matches!(err, GateError::Malformed { .. }), "{raw} accepted");
        }
    }

    #[test]
    fn inserted_record_decodes_back() {
        let mut doc = PolicyDocument::new();
        doc.insert("android", ios());
        assert_eq!(doc.record("android").unwrap(), Some(ios()));
        assert_eq!(
            doc.to_json().unwrap(),
            r#"{"android":{"enabled":true,"latest":"2.4.5","minimum":"1.0.0","url":"http://example.com"}}"#
        );
    }

    #[test]
    fn json_roundtrip_preserves_document() {
        let doc = PolicyDocument::new().with_record("ios", ios());
        let raw = doc.to_json().unwrap();
        assert_eq!(PolicyDocument::from_json(&raw).unwrap(), doc);
    }
}
