//! JSON output parsing
//!
//! Malformed output collapses to the empty value with at most a trace line.

use serde_json::Value;
use tracing::trace;
use xpumon_core::{Device, Snapshot};

/// Field holding the device array in `discovery -j` output
pub const DEVICE_LIST_FIELD: &str = "device_list";

/// Extract the device entries from discovery output.
///
/// Entries that are not JSON objects are dropped.
pub fn device_list(output: &str) -> Vec<Device> {
    let root = match serde_json::from_str::<Value>(output) {
        Ok(Value::Object(root)) => root,
        Ok(other) => {
            trace!(kind = json_kind(&other), "Discovery output is not a JSON object");
            return Vec::new();
        }
        Err(e) => {
            trace!(error = %e, "Discovery output is not valid JSON");
            return Vec::new();
        }
    };

    match root.get(DEVICE_LIST_FIELD) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| entry.as_object().cloned())
            .collect(),
        _ => Vec::new(),
    }
}

/// Parse a single JSON object, or the empty map if the output is not one
pub fn snapshot(output: &str) -> Snapshot {
    match serde_json::from_str::<Snapshot>(output) {
        Ok(map) => map,
        Err(e) => {
            trace!(error = %e, "Output is not a JSON object");
            Snapshot::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn device_list_extracts_entries() {
        let devices = device_list(r#"{"device_list":[{"id":"0"}]}"#);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].get("id"), Some(&json!("0")));
    }

    #[test]
    fn device_list_preserves_vendor_fields() {
        let output = r#"{"device_list":[
            {"device_id":0,"device_name":"Intel(R) Data Center GPU Max 1550","pci_bdf_address":"0000:29:00.0"},
            {"device_id":1,"device_name":"Intel(R) Data Center GPU Max 1550","pci_bdf_address":"0000:3a:00.0"}
        ]}"#;
        let devices = device_list(output);
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[1]["pci_bdf_address"], json!("0000:3a:00.0"));
    }

    #[test]
    fn device_list_empty_cases() {
        assert!(device_list("{}").is_empty());
        assert!(device_list("not json").is_empty());
        assert!(device_list("").is_empty());
        assert!(device_list("[1,2]").is_empty());
        assert!(device_list(r#"{"device_list":{"id":"0"}}"#).is_empty());
    }

    #[test]
    fn device_list_drops_non_object_entries() {
        let devices = device_list(r#"{"device_list":[{"id":"0"}, 7, "x", null]}"#);
        assert_eq!(devices.len(), 1);
    }

    #[test]
    fn snapshot_passes_object_through() {
        let map = snapshot(r#"{"temperature":45,"nested":{"a":[1,2]}}"#);
        assert_eq!(
            Value::Object(map),
            json!({"temperature": 45, "nested": {"a": [1, 2]}})
        );
    }

    #[test]
    fn snapshot_empty_cases() {
        assert!(snapshot("").is_empty());
        assert!(snapshot("not json").is_empty());
        assert!(snapshot("[]").is_empty());
        assert!(snapshot("42").is_empty());
        assert!(snapshot(r#"{"temperature":"#).is_empty());
    }
}
