//! Supported languages and translation maps.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A language the platform translates content into and out of.
///
/// Declaration order is the fixed enumeration order used for every
/// deterministic tie-break (and for `Ord`, so maps iterate in this order).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    En,
    Ta,
    Hi,
    Ml,
    Bn,
    Te,
}

impl LanguageCode {
    /// Every supported language in enumeration order.
    pub const ALL: [LanguageCode; 6] = [
        LanguageCode::En,
        LanguageCode::Ta,
        LanguageCode::Hi,
        LanguageCode::Ml,
        LanguageCode::Bn,
        LanguageCode::Te,
    ];

    /// Wire code (ISO 639-1).
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Ta => "ta",
            LanguageCode::Hi => "hi",
            LanguageCode::Ml => "ml",
            LanguageCode::Bn => "bn",
            LanguageCode::Te => "te",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageCode::En => "English",
            LanguageCode::Ta => "Tamil",
            LanguageCode::Hi => "Hindi",
            LanguageCode::Ml => "Malayalam",
            LanguageCode::Bn => "Bengali",
            LanguageCode::Te => "Telugu",
        }
    }

    /// Parse a wire code (case-insensitive). Unsupported codes yield `None`.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(code))
    }

    /// Parse a wire code, collapsing anything unsupported to English.
    pub fn parse_or_english(code: &str) -> Self {
        Self::parse(code).unwrap_or(LanguageCode::En)
    }

    /// Code -> display name table for every supported language.
    pub fn supported() -> BTreeMap<&'static str, &'static str> {
        Self::ALL
            .iter()
            .map(|lang| (lang.as_str(), lang.display_name()))
            .collect()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ModelError::UnsupportedLanguage(s.to_string()))
    }
}

/// Coarse confidence bucket exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Bucket a confidence score in [0, 1].
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            ConfidenceTier::High
        } else if score >= 0.4 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

/// Translations of a single source text keyed by language.
///
/// Serializes as a plain `{ "<code>": "<text>" }` object with keys in
/// enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TranslationMap(BTreeMap<LanguageCode, String>);

impl TranslationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map seeded with the identity entry for the source language.
    pub fn seeded(source: LanguageCode, text: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert(source, text);
        map
    }

    pub fn insert(&mut self, lang: LanguageCode, text: impl Into<String>) -> Option<String> {
        self.0.insert(lang, text.into())
    }

    pub fn get(&self, lang: LanguageCode) -> Option<&str> {
        self.0.get(&lang).map(String::as_str)
    }

    pub fn contains(&self, lang: LanguageCode) -> bool {
        self.0.contains_key(&lang)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn languages(&self) -> impl Iterator<Item = LanguageCode> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LanguageCode, &str)> {
        self.0.iter().map(|(lang, text)| (*lang, text.as_str()))
    }

    /// Text in the preferred language, falling back to English, then to the
    /// first entry in enumeration order.
    pub fn preferred(&self, preferred: LanguageCode) -> Option<&str> {
        self.get(preferred)
            .or_else(|| self.get(LanguageCode::En))
            .or_else(|| self.0.values().next().map(String::as_str))
    }

    pub fn into_inner(self) -> BTreeMap<LanguageCode, String> {
        self.0
    }
}

impl From<BTreeMap<LanguageCode, String>> for TranslationMap {
    fn from(map: BTreeMap<LanguageCode, String>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_table_has_six_entries() {
        let table = LanguageCode::supported();
        assert_eq!(table.len(), 6);
        for code in ["en", "ta", "hi", "ml", "bn", "te"] {
            assert!(table.contains_key(code), "missing {code}");
        }
        assert_eq!(table["ml"], "Malayalam");
    }

    #[test]
    fn test_parse_is_case_insensitive_and_closed() {
        assert_eq!(LanguageCode::parse("TA"), Some(LanguageCode::Ta));
        assert_eq!(LanguageCode::parse(" hi "), Some(LanguageCode::Hi));
        assert_eq!(LanguageCode::parse("es"), None);
        assert_eq!(LanguageCode::parse_or_english("kn"), LanguageCode::En);
        assert!("fr".parse::<LanguageCode>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_codes() {
        let json = serde_json::to_string(&LanguageCode::Bn).unwrap();
        assert_eq!(json, "\"bn\"");
        let lang: LanguageCode = serde_json::from_str("\"te\"").unwrap();
        assert_eq!(lang, LanguageCode::Te);
    }

    #[test]
    fn test_translation_map_serializes_as_object() {
        let mut map = TranslationMap::seeded(LanguageCode::Ta, "வேலை");
        map.insert(LanguageCode::En, "work");
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({"en": "work", "ta": "வேலை"}));

        let back: TranslationMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_preferred_fallback_chain() {
        let mut map = TranslationMap::seeded(LanguageCode::Hi, "काम");
        assert_eq!(map.preferred(LanguageCode::Ta), Some("काम"));

        map.insert(LanguageCode::En, "work");
        assert_eq!(map.preferred(LanguageCode::Ta), Some("work"));

        map.insert(LanguageCode::Ta, "வேலை");
        assert_eq!(map.preferred(LanguageCode::Ta), Some("வேலை"));

        assert_eq!(TranslationMap::new().preferred(LanguageCode::En), None);
    }

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(ConfidenceTier::from_score(1.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(0.5), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.2), ConfidenceTier::Low);
    }
}
