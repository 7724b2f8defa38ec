//! Object filters.

use serde_json::{Map, Value};

/// Whether the value is an object. Arrays count as objects.
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Turn an object of objects into an array, keeping each key as `id`.
///
/// `{"1": {"name": "A"}}` → `[{"id": "1", "name": "A"}]`. An `id` field on
/// the entry itself wins over the key. Entries that are not objects only
/// contribute their key, and array indexes act as keys.
pub fn object_to_array(value: &Value) -> Vec<Value> {
    let entries: Vec<(String, &Value)> = match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .map(|(key, entry)| {
            let mut record = Map::new();
            record.insert("id".to_string(), Value::String(key));
            if let Value::Object(fields) = entry {
                record.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            Value::Object(record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objects_and_arrays() {
        assert!(is_object(&json!({"name": "Sally"})));
        assert!(is_object(&json!(["england"])));
        assert!(!is_object(&json!("great britain")));
        assert!(!is_object(&json!(42)));
        assert!(!is_object(&Value::Null));
    }

    #[test]
    fn keys_become_ids() {
        let organisations = json!({
            "1234": {"name": "Department for Transport"},
            "5678": {"name": "Home Office"}
        });
        assert_eq!(
            object_to_array(&organisations),
            vec![
                json!({"id": "1234", "name": "Department for Transport"}),
                json!({"id": "5678", "name": "Home Office"}),
            ]
        );
    }

    #[test]
    fn entry_id_wins() {
        let data = json!({"a": {"id": "override", "name": "A"}});
        assert_eq!(object_to_array(&data), vec![json!({"id": "override", "name": "A"})]);
    }

    #[test]
    fn arrays_use_indexes() {
        let data = json!([{"name": "A"}, "plain"]);
        assert_eq!(
            object_to_array(&data),
            vec![json!({"id": "0", "name": "A"}), json!({"id": "1"})]
        );
    }

    #[test]
    fn scalars_give_nothing() {
        assert!(object_to_array(&json!("text")).is_empty());
    }
}
