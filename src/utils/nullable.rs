use serde::{Deserialize, Deserializer};

/// Deserialize a field that the backend may send as `null`, using the
/// type's default in that case.
///
/// Pair with `#[serde(default)]` so a missing key is handled the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "null_as_default")]
        flag: bool,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
    }

    #[test]
    fn test_null_and_missing_use_default() {
        let row: Row = serde_json::from_str(r#"{"flag": null, "tags": null}"#).unwrap();
        assert!(!row.flag);
        assert!(row.tags.is_empty());

        let row: Row = serde_json::from_str("{}").unwrap();
        assert!(!row.flag);
    }

    #[test]
    fn test_present_value_kept() {
        let row: Row = serde_json::from_str(r#"{"flag": true, "tags": ["a"]}"#).unwrap();
        assert!(row.flag);
        assert_eq!(row.tags, vec!["a".to_string()]);
    }

    #[test]
    fn test_wrong_type_still_fails() {
        assert!(serde_json::from_str::<Row>(r#"{"flag": "yes"}"#).is_err());
    }
}
