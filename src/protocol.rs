//! Telemetry grammar for instrument responses
//!
//! Responses are single lines of the form `<key>:<value>` or
//! `<key>=<value>`, e.g. `opmode=off` or `TEMP: 42`. Keys are
//! normalized to lowercase; all keys are treated uniformly (the codec
//! attaches no meaning to `opmode` or any other name). Lines that do
//! not match the grammar pass through as raw events.

/// Parse a `key=value` / `key:value` line.
///
/// The key is letters/digits/underscore, the separator is `:` or `=`
/// with optional surrounding whitespace. Returns the lowercased key and
/// trimmed value, or `None` when the line does not fit the shape.
/// At least one character must follow the separator; a value that trims
/// to empty (e.g. `"key= "`) still matches.
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let bytes = line.as_bytes();
    let mut i = 0;

    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }

    let key_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
        i += 1;
    }
    if i == key_start {
        return None;
    }
    let key = line[key_start..i].to_ascii_lowercase();

    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i >= bytes.len() || (bytes[i] != b':' && bytes[i] != b'=') {
        return None;
    }
    i += 1;

    if i >= bytes.len() {
        return None;
    }
    let value = line[i..].trim().to_string();

    Some((key, value))
}

/// Build an outgoing query string: trims the command and appends a
/// trailing `?` unless one is already present. Idempotent.
pub fn build_query(command: &str) -> String {
    let command = command.trim();
    if command.ends_with('?') {
        command.to_string()
    } else {
        format!("{}?", command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value_equals() {
        assert_eq!(
            parse_key_value("opmode=off"),
            Some(("opmode".to_string(), "off".to_string()))
        );
    }

    #[test]
    fn test_parse_key_value_colon() {
        assert_eq!(
            parse_key_value("TEMP: 42"),
            Some(("temp".to_string(), "42".to_string()))
        );
    }

    #[test]
    fn test_parse_key_value_whitespace() {
        assert_eq!(
            parse_key_value("  Power =  12.5 "),
            Some(("power".to_string(), "12.5".to_string()))
        );
    }

    #[test]
    fn test_parse_key_value_invalid() {
        assert_eq!(parse_key_value("not a kv pair"), None);
        assert_eq!(parse_key_value(""), None);
        assert_eq!(parse_key_value("   "), None);
        assert_eq!(parse_key_value("=value"), None);
        assert_eq!(parse_key_value("key="), None);
        assert_eq!(parse_key_value("key!=value"), None);
    }

    #[test]
    fn test_parse_key_value_underscore_and_digits() {
        assert_eq!(
            parse_key_value("rf_counter_2: 1000"),
            Some(("rf_counter_2".to_string(), "1000".to_string()))
        );
    }

    #[test]
    fn test_parse_whitespace_only_value() {
        // One character follows the separator, so this matches with an
        // empty trimmed value.
        assert_eq!(
            parse_key_value("key= "),
            Some(("key".to_string(), String::new()))
        );
    }

    #[test]
    fn test_build_query() {
        assert_eq!(build_query("opmode"), "opmode?");
        assert_eq!(build_query("  opmode  "), "opmode?");
    }

    #[test]
    fn test_build_query_idempotent() {
        assert_eq!(build_query("opmode?"), "opmode?");
        assert_eq!(build_query(&build_query("opmode")), "opmode?");
    }
}
