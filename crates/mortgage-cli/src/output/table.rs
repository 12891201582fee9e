use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tabled::{builder::Builder, Table};

use mortgage_core::format::format_currency;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_key_value(map);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    match result {
        Value::Object(res_map) => {
            // Schedules: summary figures first, then the rows
            if let Some(Value::Object(summary)) = res_map.get("summary") {
                print_key_value(summary);
            }
            let scalars: serde_json::Map<String, Value> = res_map
                .iter()
                .filter(|(_, v)| !v.is_array() && !v.is_object())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            print_key_value(&scalars);
            if let Some(Value::Array(yearly)) = res_map.get("yearly") {
                println!();
                print_array_table(yearly);
            }
        }
        _ => print_key_value(envelope),
    }

    if let Some(Value::Object(display)) = envelope.get("display") {
        println!();
        print_key_value(display);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_key_value(map: &serde_json::Map<String, Value>) {
    if map.is_empty() {
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &display_cell(key, val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        if arr.is_empty() {
            println!("(empty)");
        }
        for item in arr {
            println!("{}", display_cell("", item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h).map(|v| display_cell(h, v)).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

/// Render one cell. Monetary decimals are shown to the cent with separators;
/// rates keep full precision.
pub fn display_cell(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) if !key.ends_with("rate") && !key.ends_with("percent") => {
            match Decimal::from_str(s) {
                Ok(amount) => format_currency(amount, 2),
                Err(_) => s.clone(),
            }
        }
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => arr
            .iter()
            .map(|v| display_cell(key, v))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_money_rounded_rates_kept() {
        assert_eq!(display_cell("loan_amount", &json!("240000")), "240,000.00");
        assert_eq!(display_cell("monthly_rate", &json!("0.0054166666")), "0.0054166666");
        assert_eq!(display_cell("annual_rate_percent", &json!("6.5")), "6.5");
    }

    #[test]
    fn test_non_decimal_strings_untouched() {
        assert_eq!(display_cell("payment_date", &json!("2026-03-01")), "2026-03-01");
        assert_eq!(display_cell("number_of_months", &json!(360)), "360");
    }
}
