use serde_json::{Map, Value};

use crate::error::{ExtractionError, Result};

pub type Metadata = Map<String, Value>;

/// Parses the info JSON printed by an extractor.
///
/// Multi-line output (one object per line) resolves to the last non-empty
/// line. A playlist object resolves to its first entry.
pub fn parse_info_json(output: &str) -> Result<Metadata> {
    let line = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .ok_or_else(|| ExtractionError::InvalidMetadata("extractor printed nothing".to_string()))?;

    let value: Value = serde_json::from_str(line)
        .map_err(|e| ExtractionError::InvalidMetadata(e.to_string()))?;

    into_single_item(value)
}

fn into_single_item(value: Value) -> Result<Metadata> {
    let Value::Object(mut object) = value else {
        return Err(ExtractionError::InvalidMetadata(
            "expected a JSON object".to_string(),
        ));
    };

    if object.get("_type").and_then(Value::as_str) == Some("playlist") {
        let first = object
            .get_mut("entries")
            .and_then(Value::as_array_mut)
            .filter(|entries| !entries.is_empty())
            .map(|entries| entries.swap_remove(0))
            .ok_or_else(|| ExtractionError::InvalidMetadata("playlist has no entries".to_string()))?;
        return into_single_item(first);
    }

    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_last_json_line() {
        let output = "{\"id\": \"first\"}\n{\"id\": \"abc\", \"ext\": \"mp4\"}\n\n";
        let meta = parse_info_json(output).unwrap();
        assert_eq!(meta["id"], "abc");
        assert_eq!(meta["ext"], "mp4");
    }

    #[test]
    fn playlist_resolves_to_first_entry() {
        let output = r#"{"_type": "playlist", "entries": [{"id": "one", "ext": "mp4"}, {"id": "two", "ext": "mp4"}]}"#;
        let meta = parse_info_json(output).unwrap();
        assert_eq!(meta["id"], "one");
    }

    #[test]
    fn empty_playlist_is_rejected() {
        let output = r#"{"_type": "playlist", "entries": []}"#;
        assert!(matches!(
            parse_info_json(output),
            Err(ExtractionError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn empty_output_is_rejected() {
        assert!(matches!(
            parse_info_json("  \n"),
            Err(ExtractionError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(matches!(
            parse_info_json("[1, 2]"),
            Err(ExtractionError::InvalidMetadata(_))
        ));
        assert!(parse_info_json("not json").is_err());
    }
}
