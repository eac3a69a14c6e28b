use serde_json::Value;

use super::{display_value, result_object};

/// Headline figure of each calculation, in lookup order.
const HEADLINE_KEYS: [&str; 3] = ["monthly_payment", "max_loan_amount", "loan_term"];

/// Print only the headline answer of the calculation.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let Some(result) = result_object(value) else {
        return display_value(value);
    };

    for key in HEADLINE_KEYS {
        match result.get(key) {
            Some(Value::Object(split)) => {
                let years = split.get("years").map(display_value).unwrap_or_default();
                let months = split.get("months").map(display_value).unwrap_or_default();
                return format!("{}y {}m", years, months);
            }
            Some(v) if !v.is_null() => return display_value(v),
            _ => {}
        }
    }

    result
        .get("months")
        .map(display_value)
        .unwrap_or_else(|| display_value(value))
}
