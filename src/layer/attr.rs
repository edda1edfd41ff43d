use std::collections::BTreeMap;

use serde::Serialize;

/// A single attribute value carried through from the layer source.
///
/// The engine only ever reads the department-name attribute; everything else
/// is passed through untouched for tooltips and exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// ISO-8601 calendar date (`YYYY-MM-DD`), kept as text so it serializes cleanly.
    Date(String),
}

impl AttrValue {
    /// Get the trimmed text of a `Text` value, if non-empty.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s.trim()).filter(|s| !s.is_empty()),
            _ => None,
        }
    }

    #[inline] pub fn is_null(&self) -> bool { matches!(self, AttrValue::Null) }

    /// Build a `Date` value from calendar parts.
    pub fn date(year: u32, month: u32, day: u32) -> Self {
        AttrValue::Date(format!("{year:04}-{month:02}-{day:02}"))
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self { AttrValue::Text(value.to_string()) }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self { AttrValue::Text(value) }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self { AttrValue::Number(value) }
}

/// Attribute name → value, ordered by name.
pub type Attributes = BTreeMap<String, AttrValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_trimmed_and_blank_text_is_absent() {
        assert_eq!(AttrValue::from("  ANTIOQUIA ").as_text(), Some("ANTIOQUIA"));
        assert_eq!(AttrValue::from("   ").as_text(), None);
        assert_eq!(AttrValue::Number(5.0).as_text(), None);
    }

    #[test]
    fn dates_serialize_as_iso_text() {
        let value = AttrValue::date(2024, 3, 7);
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"2024-03-07\"");
        assert_eq!(serde_json::to_string(&AttrValue::Null).unwrap(), "null");
    }
}
