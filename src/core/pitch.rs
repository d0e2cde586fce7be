//! Pitch sections as produced by the backend and kept in the store.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// A section of the pitch. Decoding is lenient: a null or mistyped field
/// reads as absent instead of rejecting the whole section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PitchSection {
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: String,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub original: Option<String>,
}

fn string_from_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(string_from_value(value).unwrap_or_default())
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(string_from_value(value))
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

impl PitchSection {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// True when the section carries any text, generated or original.
    pub fn is_populated(&self) -> bool {
        !self.text.is_empty() || self.original.as_deref().is_some_and(|o| !o.is_empty())
    }
}

/// Ordered mapping of section key to section.
///
/// Keys keep the order in which they were first inserted, which is also the
/// order the backend returned them in. Entries that are not objects are
/// dropped on decode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct PitchData {
    sections: Vec<(String, PitchSection)>,
}

impl PitchData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&PitchSection> {
        self.sections
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, section)| section)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts or replaces a section. A replaced section keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, section: PitchSection) -> Option<PitchSection> {
        let key = key.into();
        match self.sections.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, section)),
            None => {
                self.sections.push((key, section));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PitchSection)> {
        self.sections.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, PitchSection)> for PitchData {
    fn from_iter<I: IntoIterator<Item = (K, PitchSection)>>(iter: I) -> Self {
        let mut data = PitchData::new();
        for (key, section) in iter {
            data.insert(key, section);
        }
        data
    }
}

impl From<Map<String, Value>> for PitchData {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter()
            .filter_map(|(key, value)| {
                if !value.is_object() {
                    debug!(key = %key, "Skipping non-object pitch section");
                    return None;
                }
                match serde_json::from_value::<PitchSection>(value) {
                    Ok(section) => Some((key, section)),
                    Err(e) => {
                        debug!(key = %key, error = %e, "Skipping malformed pitch section");
                        None
                    }
                }
            })
            .collect()
    }
}

impl From<PitchData> for Map<String, Value> {
    fn from(data: PitchData) -> Self {
        data.sections
            .into_iter()
            .filter_map(|(key, section)| serde_json::to_value(section).ok().map(|v| (key, v)))
            .collect()
    }
}

/// Turns a display name into a section key: lowercase, spaces become
/// underscores.
pub fn canonical_key(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Turns a section key back into a heading, `business_model` → `Business Model`.
pub fn display_name(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_preserves_order_and_drops_non_objects() {
        let json = r#"{
            "problem": {"text": "Founders waste months"},
            "note": "not a section",
            "solution": {"text": "We automate it", "confidence": 0.9},
            "count": 3,
            "market": {"original": "Large market"}
        }"#;

        let data: PitchData = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = data.keys().collect();
        assert_eq!(keys, vec!["problem", "solution", "market"]);
        assert_eq!(data.get("solution").unwrap().confidence, Some(0.9));
        assert_eq!(data.get("market").unwrap().text, "");
        assert_eq!(
            data.get("market").unwrap().original.as_deref(),
            Some("Large market")
        );
    }

    #[test]
    fn test_decode_tolerates_null_and_mistyped_fields() {
        let json = r#"{
            "business_model": {"text": null, "original": "Y"},
            "traction": {"text": "1,200 users", "confidence": "high"},
            "ask": {"text": "Raising $2M", "confidence": "0.75", "original": null},
            "team": {"text": 4}
        }"#;

        let data: PitchData = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = data.keys().collect();
        assert_eq!(keys, vec!["business_model", "traction", "ask", "team"]);

        let model = data.get("business_model").unwrap();
        assert_eq!(model.text, "");
        assert_eq!(model.original.as_deref(), Some("Y"));
        assert!(model.is_populated());

        let traction = data.get("traction").unwrap();
        assert_eq!(traction.text, "1,200 users");
        assert!(traction.confidence.is_none());

        let ask = data.get("ask").unwrap();
        assert_eq!(ask.confidence, Some(0.75));
        assert!(ask.original.is_none());

        assert_eq!(data.get("team").unwrap().text, "4");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut data: PitchData = [
            ("problem", PitchSection::new("a")),
            ("solution", PitchSection::new("b")),
        ]
        .into_iter()
        .collect();

        let previous = data.insert("problem", PitchSection::new("c"));
        assert_eq!(previous, Some(PitchSection::new("a")));
        data.insert("traction", PitchSection::new("d"));

        let keys: Vec<_> = data.keys().collect();
        assert_eq!(keys, vec!["problem", "solution", "traction"]);
        assert_eq!(data.get("problem").unwrap().text, "c");
    }

    #[test]
    fn test_encode_keeps_order() {
        let data: PitchData = [
            ("zeta", PitchSection::new("z")),
            ("alpha", PitchSection::new("a")),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"zeta":{"text":"z"},"alpha":{"text":"a"}}"#);
    }

    #[test]
    fn test_is_populated() {
        assert!(PitchSection::new("x").is_populated());
        assert!(!PitchSection::default().is_populated());
        let original_only = PitchSection {
            original: Some("y".to_string()),
            ..Default::default()
        };
        assert!(original_only.is_populated());
        let empty_original = PitchSection {
            original: Some(String::new()),
            ..Default::default()
        };
        assert!(!empty_original.is_populated());
    }

    #[test]
    fn test_key_helpers() {
        assert_eq!(canonical_key("Business Model"), "business_model");
        assert_eq!(canonical_key("  Go To Market "), "go_to_market");
        assert_eq!(display_name("business_model"), "Business Model");
        assert_eq!(display_name("ask"), "Ask");
    }
}
