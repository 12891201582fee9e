use serde_json::Value;

use super::table::display_cell;

/// Headline figure for each command, most specific first.
const PRIORITY_KEYS: [&str; 4] = [
    "total_monthly_payment",
    "monthly_payment",
    "monthly_principal_and_interest",
    "total_interest",
];

/// Print just the headline number, rounded for reading.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        // schedule envelopes nest the loan figures under "summary"
        let summary = map.get("summary").and_then(Value::as_object).unwrap_or(map);
        for key in PRIORITY_KEYS {
            if let Some(val) = summary.get(key) {
                if !val.is_null() {
                    return display_cell(key, val);
                }
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, display_cell(key, val));
        }
    }

    if let Value::Array(rows) = result_obj {
        return format!("{} rows", rows.len());
    }
    display_cell("", result_obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefers_total_monthly_payment() {
        let value = json!({"result": {
            "loan_amount": "300000",
            "monthly_principal_and_interest": "1798.6515754",
            "total_monthly_payment": "2198.6515754",
        }});
        assert_eq!(headline(&value), "2,198.65");
    }

    #[test]
    fn test_quote_payment_passes_through() {
        let value = json!({"result": {"monthly_payment": "1798.65", "years": 30}});
        assert_eq!(headline(&value), "1,798.65");
    }

    #[test]
    fn test_schedule_uses_summary() {
        let value = json!({"result": {
            "summary": {"total_monthly_payment": "1438.9210"},
            "periods": [],
        }});
        assert_eq!(headline(&value), "1,438.92");
    }
}
