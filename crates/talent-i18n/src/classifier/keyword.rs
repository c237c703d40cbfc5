use talent_models::LanguageCode;

use super::{strongest, Classifier};

/// Domain vocabulary per language, in enumeration order.
///
/// Each keyword is scored at most once per text, weighted by its length in
/// characters, so a keyword repeated many times does not outweigh a broader
/// match in another language.
const KEYWORDS: [(LanguageCode, &[&str]); 6] = [
    (
        LanguageCode::En,
        &[
            "work",
            "job",
            "company",
            "experience",
            "skill",
            "student",
            "internship",
            "project",
            "developer",
            "engineer",
        ],
    ),
    (
        LanguageCode::Ta,
        &[
            "தமிழ்",
            "வேலை",
            "நிறுவனம்",
            "திறமை",
            "அனுபவம்",
            "மாணவர்",
            "பணி",
            "வேலைவாய்ப்பு",
        ],
    ),
    (
        LanguageCode::Hi,
        &[
            "काम",
            "कंपनी",
            "अनुभव",
            "कौशल",
            "नौकरी",
            "छात्र",
            "रोजगार",
            "इंटर्नशिप",
            "प्रोजेक्ट",
        ],
    ),
    (
        LanguageCode::Ml,
        &[
            "ജോലി",
            "കമ്പനി",
            "അനുഭവം",
            "കഴിവ്",
            "വിദ്യാർത്ഥി",
            "പദ്ധതി",
            "ഇന്റേൺഷിപ്പ്",
        ],
    ),
    (
        LanguageCode::Bn,
        &[
            "কাজ",
            "কোম্পানি",
            "অভিজ্ঞতা",
            "দক্ষতা",
            "চাকরি",
            "ছাত্র",
            "প্রকল্প",
            "ইন্টার্নশিপ",
        ],
    ),
    (
        LanguageCode::Te,
        &[
            "పని",
            "కంపెనీ",
            "అనుభవం",
            "నైపుణ్యం",
            "ఉద్యోగం",
            "విద్యార్థి",
            "ప్రాజెక్ట్",
            "ఇంటర్న్‌షిప్",
        ],
    ),
];

/// Votes for the language whose vocabulary best covers the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Sum of the character lengths of the distinct keywords present.
    fn score(lowered: &str, keywords: &[&str]) -> usize {
        keywords
            .iter()
            .filter(|keyword| lowered.contains(*keyword))
            .map(|keyword| keyword.chars().count())
            .sum()
    }
}

impl Classifier for KeywordClassifier {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn classify(&self, text: &str) -> Option<LanguageCode> {
        if text.is_empty() {
            return None;
        }
        let lowered = text.to_lowercase();

        let scores = KEYWORDS
            .iter()
            .map(|(lang, keywords)| (*lang, Self::score(&lowered, keywords)));

        strongest(scores)
            .filter(|(_, score)| *score > 0)
            .map(|(lang, _)| lang)
    }
}
