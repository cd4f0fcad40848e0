use crate::plan::Plan;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Encodes `value` with object keys sorted at every level.
pub fn stable_json_bytes(value: &Value) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&sort_keys(value))
}

pub fn stable_hash_hex(value: &Value) -> serde_json::Result<String> {
    let bytes = stable_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{digest:x}"))
}

/// SHA-256 of the stable encoding of `plan`.
pub fn plan_fingerprint(plan: &Plan) -> String {
    stable_hash_hex(&plan.to_value()).expect("plan value always encodes")
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(object) => {
            let ordered = object
                .iter()
                .map(|(key, item)| (key.clone(), sort_keys(item)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(ordered.into_iter().collect::<Map<_, _>>())
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        _ => value.clone(),
    }
}

#[cfg(test)]
#[path = "fingerprint_test.rs"]
mod tests;
