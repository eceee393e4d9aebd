//! JSON canónico: claves de objeto ordenadas y sin espacios, de modo que dos
//! payloads estructuralmente iguales producen la misma cadena.

use serde_json::Value;
use std::collections::BTreeMap;

pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Display de `Value` ya escapa la cadena como JSON.
        Value::String(_) => value.to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let tree: BTreeMap<&String, String> = map.iter().map(|(k, v)| (k, to_canonical_json(v))).collect();
            let items: Vec<String> = tree.into_iter()
                                         .map(|(k, v)| format!("{}:{}", Value::String(k.clone()), v))
                                         .collect();
            format!("{{{}}}", items.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::to_canonical_json;
    use serde_json::json;

    #[test]
    fn test_object_sorted_keys() {
        let val = json!({ "b": 2, "a": 1 });
        assert_eq!(to_canonical_json(&val), "{\"a\":1,\"b\":2}");
    }

    #[test]
    fn test_nested_with_escapes() {
        let val = json!({ "z": [ { "y": "otoño \"seco\"" }, null ], "a": { "x": 10 } });
        assert_eq!(to_canonical_json(&val), "{\"a\":{\"x\":10},\"z\":[{\"y\":\"otoño \\\"seco\\\"\"},null]}");
    }
}
