use talent_models::LanguageCode;

use super::{strongest, Classifier};

/// Minimum raw length, in characters, for frequency statistics.
const MIN_TEXT_CHARS: usize = 20;

/// Minimum alphabetic characters for frequency statistics.
const MIN_ALPHABETIC_CHARS: usize = 10;

/// Share of characteristic characters a language must exceed.
const FREQUENCY_THRESHOLD: f64 = 0.05;

/// Ten most characteristic characters per language, in enumeration order.
const COMMON_CHARS: [(LanguageCode, [char; 10]); 6] = [
    (LanguageCode::En, ['e', 't', 'a', 'o', 'i', 'n', 's', 'h', 'r', 'l']),
    (LanguageCode::Ta, ['த', 'ம', 'ல', 'ர', 'ன', 'க', 'வ', 'ப', 'ய', 'ட']),
    (LanguageCode::Hi, ['क', 'र', 'त', 'न', 'स', 'म', 'ह', 'ल', 'द', 'प']),
    (LanguageCode::Ml, ['ം', 'ന', 'ര', 'ക', 'ത', 'ല', 'മ', 'യ', 'സ', 'പ']),
    (LanguageCode::Bn, ['র', 'ত', 'ন', 'ক', 'স', 'ম', 'ল', 'দ', 'হ', 'প']),
    (LanguageCode::Te, ['త', 'న', 'ర', 'క', 'ల', 'మ', 'వ', 'స', 'ద', 'య']),
];

/// Votes by how often each language's common characters appear.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyClassifier;

impl FrequencyClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Classifier for FrequencyClassifier {
    fn name(&self) -> &'static str {
        "frequency"
    }

    fn classify(&self, text: &str) -> Option<LanguageCode> {
        if text.chars().count() < MIN_TEXT_CHARS {
            return None;
        }

        let letters: Vec<char> = text
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .collect();
        if letters.len() < MIN_ALPHABETIC_CHARS {
            return None;
        }

        let total = letters.len() as f64;
        let scores = COMMON_CHARS.iter().map(|(lang, chars)| {
            let hits = letters.iter().filter(|c| chars.contains(*c)).count();
            (*lang, hits as f64 / total)
        });

        strongest(scores)
            .filter(|(_, score)| *score > FREQUENCY_THRESHOLD)
            .map(|(lang, _)| lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_absent() {
        let classifier = FrequencyClassifier::new();
        assert_eq!(classifier.classify("short english"), None);
        // Long enough, but too few letters.
        assert_eq!(classifier.classify("1234567890 12345 abc 6789"), None);
    }

    #[test]
    fn test_english_prose() {
        let classifier = FrequencyClassifier::new();
        assert_eq!(
            classifier.classify("The team is hiring a senior backend engineer"),
            Some(LanguageCode::En)
        );
    }

    #[test]
    fn test_indic_prose() {
        let classifier = FrequencyClassifier::new();
        assert_eq!(
            classifier.classify("மதுரை நகரத்தில் பல வேலை வாய்ப்புகள் உள்ளன"),
            Some(LanguageCode::Ta)
        );
        assert_eq!(
            classifier.classify("मैं दिल्ली में सॉफ्टवेयर कंपनी में काम करता हूँ"),
            Some(LanguageCode::Hi)
        );
    }

    #[test]
    fn test_tables_in_enumeration_order() {
        let order: Vec<_> = COMMON_CHARS.iter().map(|(lang, _)| *lang).collect();
        assert_eq!(order, LanguageCode::ALL.to_vec());
    }
}
