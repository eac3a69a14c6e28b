pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Render a computation envelope in the requested format.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` object of an envelope, when there is one.
pub(crate) fn result_object(value: &Value) -> Option<&Map<String, Value>> {
    value.get("result").and_then(Value::as_object)
}

/// Schedule rows of a result, when the calculation produced them.
pub(crate) fn schedule_rows(value: &Value) -> Option<&Vec<Value>> {
    result_object(value)
        .and_then(|r| r.get("schedule"))
        .and_then(Value::as_array)
}

/// Flatten a JSON scalar for display. Containers are rendered as compact JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Columns of a list of JSON objects, taken from the first object.
pub(crate) fn columns(rows: &[Value]) -> Vec<String> {
    rows.first()
        .and_then(Value::as_object)
        .map(|first| first.keys().cloned().collect())
        .unwrap_or_default()
}

/// One row's cells in column order.
pub(crate) fn cells(row: &Value, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|c| row.get(c).map(display_value).unwrap_or_default())
        .collect()
}
