//! Lenient deserialization helpers for catalog API payloads.

use serde::{Deserialize, Deserializer};

/// A JSON scalar that may arrive as either a string or a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::Text(text) => text,
            StringOrNumber::Number(number) => number.to_string(),
        }
    }
}

/// Deserialize a string, accepting JSON numbers in their canonical text form.
///
/// # Errors
///
/// Returns the deserializer's error if the value is neither a string nor a
/// number.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

/// Deserialize a list whose entries may each be a string or a number.
///
/// # Errors
///
/// Returns the deserializer's error if the value is not a list of scalars.
pub fn strings_or_numbers<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<StringOrNumber>::deserialize(deserializer)
        .map(|values| values.into_iter().map(String::from).collect())
}

/// Deserialize an optional string, mapping JSON `null` to the empty string.
///
/// # Errors
///
/// Returns the deserializer's error if the value is neither a string nor
/// `null`.
pub fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sizes {
        #[serde(deserialize_with = "strings_or_numbers")]
        values: Vec<String>,
    }

    #[test]
    fn test_mixed_list() {
        let sizes: Sizes = serde_json::from_str(r#"{"values": [40, "41", 42.5]}"#).unwrap();
        assert_eq!(sizes.values, vec!["40", "41", "42.5"]);
    }
}
