use talent_models::LanguageCode;

use super::{strongest, Classifier};

/// Unicode block of each Indic script, scanned in this order.
const SCRIPT_RANGES: [(LanguageCode, u32, u32); 5] = [
    (LanguageCode::Ta, 0x0B80, 0x0BFF),
    (LanguageCode::Hi, 0x0900, 0x097F),
    (LanguageCode::Bn, 0x0980, 0x09FF),
    (LanguageCode::Te, 0x0C00, 0x0C7F),
    (LanguageCode::Ml, 0x0D00, 0x0D7F),
];

/// Share of alphabetic characters a script must exceed to win.
const SCRIPT_THRESHOLD: f64 = 0.30;

/// Votes for the Indic script that dominates the alphabetic characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptClassifier;

impl ScriptClassifier {
    pub fn new() -> Self {
        Self
    }

    fn script_of(c: char) -> Option<LanguageCode> {
        let code = c as u32;
        SCRIPT_RANGES
            .iter()
            .find(|(_, lo, hi)| (*lo..=*hi).contains(&code))
            .map(|(lang, _, _)| *lang)
    }
}

impl Classifier for ScriptClassifier {
    fn name(&self) -> &'static str {
        "script"
    }

    fn classify(&self, text: &str) -> Option<LanguageCode> {
        let mut counts = [0usize; LanguageCode::ALL.len()];
        let mut total = 0usize;

        for c in text.chars().filter(|c| c.is_alphabetic()) {
            total += 1;
            if let Some(lang) = Self::script_of(c) {
                counts[lang as usize] += 1;
            }
        }

        if total == 0 {
            return None;
        }

        let (lang, count) = strongest(LanguageCode::ALL.into_iter().zip(counts))?;
        (count > 0 && count as f64 / total as f64 > SCRIPT_THRESHOLD).then_some(lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_script_detected() {
        let classifier = ScriptClassifier::new();
        let cases = [
            ("தமிழ் வேலை", LanguageCode::Ta),
            ("मुझे काम चाहिए", LanguageCode::Hi),
            ("আমার কাজ দরকার", LanguageCode::Bn),
            ("నాకు పని కావాలి", LanguageCode::Te),
            ("എനിക്ക് ജോലി വേണം", LanguageCode::Ml),
        ];
        for (text, expected) in cases {
            assert_eq!(classifier.classify(text), Some(expected), "{text}");
        }
    }

    #[test]
    fn test_below_threshold_is_absent() {
        let classifier = ScriptClassifier::new();
        // One Devanagari letter among many Latin letters.
        assert_eq!(classifier.classify("looking for software work क"), None);
    }

    #[test]
    fn test_mixed_text_above_threshold() {
        let classifier = ScriptClassifier::new();
        assert_eq!(classifier.classify("job வேலை"), Some(LanguageCode::Ta));
    }

    #[test]
    fn test_no_alphabetic_chars() {
        let classifier = ScriptClassifier::new();
        assert_eq!(classifier.classify(""), None);
        assert_eq!(classifier.classify("12345 !!"), None);
        assert_eq!(classifier.classify("plain english"), None);
    }
}
