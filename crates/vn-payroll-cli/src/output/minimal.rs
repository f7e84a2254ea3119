use serde_json::Value;

/// Print just the key answer value from the output.
///
/// A net-to-gross run answers with the recovered gross; everything else
/// answers with the net figure (or the comparison winner's net), falling
/// back to the first result field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let inverse = value
        .get("methodology")
        .and_then(|m| m.as_str())
        .map(|s| s.contains("net to gross"))
        .unwrap_or(false);

    let priority_keys: &[&str] = if inverse {
        &["gross"]
    } else {
        &["net", "best_net", "applied_rule_year"]
    };

    if let Value::Object(map) = result_obj {
        for key in priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
