use serde_json::Value;
use std::io::{self, Write};

/// Write output as two-column CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_csv<W: Write>(writer: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    match value {
        Value::Object(map) => {
            let fields = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            wtr.write_record(["field", "value"])?;
            for (key, val) in fields {
                let formatted = format_csv_value(val);
                wtr.write_record([key.as_str(), formatted.as_str()])?;
            }
        }
        _ => wtr.write_record([format_csv_value(value)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => super::format_scalar(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_csv_writes_result_fields() {
        let envelope = json!({ "result": { "pmt": -146.76 }, "warnings": [] });
        let mut buf = Vec::new();
        write_csv(&mut buf, &envelope).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "field,value\npmt,-146.76\n");
    }

    #[test]
    fn test_csv_null_is_empty_cell() {
        let envelope = json!({ "result": { "npv": null } });
        let mut buf = Vec::new();
        write_csv(&mut buf, &envelope).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "field,value\nnpv,\n");
    }
}
