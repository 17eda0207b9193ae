//! Registry `versions/<name>.json` payload and entry selection.
//!
//! The payload is read as raw JSON values so that one odd entry (a null
//! platform, a numeric version) can't hide the rest of the list.

use serde_json::Value;

/// One published version of a package. Fields beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    pub number: String,
    pub platform: String,
    /// Documented as base64 but served as base16 sha256. `None` unless a string.
    pub sha: Option<String>,
}

impl VersionEntry {
    /// `None` for anything that isn't an object with string `number` and
    /// `platform`; such entries can never match a requested version.
    fn from_value(value: &Value) -> Option<Self> {
        let number = value.get("number")?.as_str()?;
        let platform = value.get("platform")?.as_str()?;
        let sha = value.get("sha").and_then(Value::as_str);
        Some(Self {
            number: number.to_string(),
            platform: platform.to_string(),
            sha: sha.map(str::to_string),
        })
    }
}

/// Decode the payload. Only a body that isn't a JSON array is an error;
/// unusable entries are skipped.
pub(crate) fn parse_versions(body: &[u8]) -> serde_json::Result<Vec<VersionEntry>> {
    let values: Vec<Value> = serde_json::from_slice(body)?;
    Ok(values.iter().filter_map(VersionEntry::from_value).collect())
}

/// First entry matching both `version` and `platform`.
pub(crate) fn select<'a>(
    entries: &'a [VersionEntry],
    version: &str,
    platform: &str,
) -> Option<&'a VersionEntry> {
    entries
        .iter()
        .find(|e| e.number == version && e.platform == platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"[
        {"number":"1.2.3","platform":"java","sha":"aaaa","downloads_count":10},
        {"number":"1.2.3","platform":"ruby","sha":"bbbb","prerelease":false},
        {"number":"1.2.3","platform":"ruby","sha":"cccc"},
        {"number":"1.2.2","platform":"ruby"}
    ]"#;

    #[test]
    fn parses_and_ignores_unknown_fields() {
        let entries = parse_versions(BODY.as_bytes()).unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries[3].sha.is_none());
    }

    #[test]
    fn selects_first_match_on_platform() {
        let entries = parse_versions(BODY.as_bytes()).unwrap();
        let e = select(&entries, "1.2.3", "ruby").unwrap();
        assert_eq!(e.sha.as_deref(), Some("bbbb"));
        let j = select(&entries, "1.2.3", "java").unwrap();
        assert_eq!(j.sha.as_deref(), Some("aaaa"));
    }

    #[test]
    fn no_match_for_unknown_version() {
        let entries = parse_versions(BODY.as_bytes()).unwrap();
        assert!(select(&entries, "9.9.9", "ruby").is_none());
        assert!(select(&entries, "1.2.2", "java").is_none());
    }

    #[test]
    fn object_payload_is_a_parse_error() {
        assert!(parse_versions(br#"{"error":"not found"}"#).is_err());
        assert!(parse_versions(b"This rubygem could not be found.").is_err());
    }

    #[test]
    fn null_sha_is_absent() {
        let entries =
            parse_versions(br#"[{"number":"0.1.0","platform":"ruby","sha":null}]"#).unwrap();
        assert!(entries[0].sha.is_none());
    }

    #[test]
    fn malformed_entries_do_not_hide_valid_ones() {
        let hex = "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03";
        let body = format!(
            r#"[
                {{"number":"0.0.1","platform":null}},
                {{"number":2,"platform":"ruby","sha":"dddd"}},
                {{"platform":"ruby"}},
                null,
                "1.2.3",
                {{"number":"1.2.3","platform":"ruby","sha":"{hex}"}}
            ]"#
        );
        let entries = parse_versions(body.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        let e = select(&entries, "1.2.3", "ruby").unwrap();
        assert_eq!(e.sha.as_deref(), Some(hex));
    }

    #[test]
    fn non_string_sha_is_absent() {
        let entries =
            parse_versions(br#"[{"number":"1.0.0","platform":"ruby","sha":12345}]"#).unwrap();
        assert_eq!(
            entries,
            vec![VersionEntry {
                number: "1.0.0".to_string(),
                platform: "ruby".to_string(),
                sha: None,
            }]
        );
    }
}
