use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cells, columns, display_value, result_object};

/// Summary table of the scalar results, then the yearly balance curve,
/// then any warnings and the methodology line.
pub fn print_table(value: &Value) {
    let Some(result) = result_object(value) else {
        println!("{}", display_value(value));
        return;
    };

    println!("{}", summary_table(result));

    if let Some(Value::Array(curve)) = result.get("balance_curve") {
        if !curve.is_empty() {
            println!("\nBalance by year:");
            println!("{}", rows_table(curve));
        }
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(methodology)) = value.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn summary_table(result: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in result {
        let shown = match val {
            // the schedule and curve get their own sections
            Value::Array(_) => continue,
            Value::Object(split) if split.contains_key("years") => format!(
                "{} years {} months",
                split.get("years").map(display_value).unwrap_or_default(),
                split.get("months").map(display_value).unwrap_or_default()
            ),
            Value::Null => "-".to_string(),
            other => display_value(other),
        };
        builder.push_record([key.clone(), shown]);
    }
    builder.build()
}

fn rows_table(rows: &[Value]) -> Table {
    let header = columns(rows);
    let mut builder = Builder::default();
    builder.push_record(header.clone());
    for row in rows {
        builder.push_record(cells(row, &header));
    }
    builder.build()
}
