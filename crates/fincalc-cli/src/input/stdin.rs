use serde_json::Value;
use std::io::{self, Read};

/// Piped JSON on stdin, if any. An interactive terminal or an empty pipe
/// yields `None` so the caller falls back to flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped(buffer: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    match buffer.trim() {
        "" => Ok(None),
        trimmed => serde_json::from_str(trimmed)
            .map(Some)
            .map_err(|e| format!("Failed to parse JSON from stdin: {}", e).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_pipe_falls_back_to_flags() {
        assert!(parse_piped("  \n").unwrap().is_none());
    }

    #[test]
    fn test_piped_json_is_parsed() {
        let value = parse_piped(r#"{"value": 1000, "rate": 0.1}"#).unwrap().unwrap();
        assert_eq!(value["rate"], 0.1);
    }

    #[test]
    fn test_malformed_pipe_names_stdin() {
        let err = parse_piped("{not json").unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }
}
