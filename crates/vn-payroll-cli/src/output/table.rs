use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Scalar and one-level-nested fields of the result land in a Field/Value
/// table with dotted keys (e.g. `insurance.bhxh`); arrays of objects such
/// as the payslip breakdown or comparison ranking get their own table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_fields(value);
                print_subtables(value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    print_fields(result);
    print_subtables(result);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

/// Field/Value table of everything except arrays of objects.
fn print_fields(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", value);
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        match val {
            Value::Object(nested) => {
                for (nested_key, nested_val) in nested {
                    builder.push_record([
                        format!("{}.{}", key, nested_key).as_str(),
                        &format_value(nested_val),
                    ]);
                }
            }
            Value::Array(arr) if arr.iter().all(|v| v.is_object()) && !arr.is_empty() => {
                // Rendered as its own table below
            }
            _ => {
                builder.push_record([key.as_str(), &format_value(val)]);
            }
        }
    }
    println!("{}", Table::from(builder));
}

/// One table per array-of-objects field.
fn print_subtables(value: &Value) {
    let Value::Object(map) = value else { return };
    for (key, val) in map {
        if let Value::Array(arr) = val {
            if !arr.is_empty() && arr.iter().all(|v| v.is_object()) {
                println!("\n{}:", key);
                print_array_table(arr);
            }
        }
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
