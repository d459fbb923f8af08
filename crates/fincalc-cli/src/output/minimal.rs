use serde_json::Value;

use super::format_scalar;

/// Keys holding the answer of each command, in lookup order.
const ANSWER_KEYS: [&str; 4] = ["npv", "irr", "pmt", "rounded"];

/// Print just the answer of a computation envelope.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in ANSWER_KEYS {
            if let Some(val) = map.get(key) {
                return format_scalar(val);
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_scalar(val));
        }
    }

    format_scalar(result_obj)
}
