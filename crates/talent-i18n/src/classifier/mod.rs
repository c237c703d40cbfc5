//! Independent classifiers that each cast at most one vote.
//!
//! Every classifier resolves ties by [`LanguageCode::ALL`] order so the
//! same text always yields the same verdict.

mod frequency;
mod keyword;
mod script;

pub use frequency::FrequencyClassifier;
pub use keyword::KeywordClassifier;
pub use script::ScriptClassifier;

use talent_models::LanguageCode;

/// A single detection signal.
pub trait Classifier: Send + Sync {
    /// Short label used in logs and metrics.
    fn name(&self) -> &'static str;

    /// The language this classifier votes for, or `None` for no signal.
    fn classify(&self, text: &str) -> Option<LanguageCode>;
}

/// Highest-scoring language, keeping the earliest one on ties.
///
/// `scores` must be yielded in enumeration order.
pub(crate) fn strongest<T>(scores: impl IntoIterator<Item = (LanguageCode, T)>) -> Option<(LanguageCode, T)>
where
    T: PartialOrd + Copy,
{
    let mut best: Option<(LanguageCode, T)> = None;
    for (lang, score) in scores {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((lang, score)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strongest_prefers_first_on_tie() {
        let scores = [
            (LanguageCode::En, 2),
            (LanguageCode::Ta, 5),
            (LanguageCode::Hi, 5),
        ];
        assert_eq!(strongest(scores), Some((LanguageCode::Ta, 5)));
        assert_eq!(strongest(Vec::<(LanguageCode, u32)>::new()), None);
    }

    #[test]
    fn test_classifier_labels_are_distinct() {
        let classifiers: [&dyn Classifier; 3] = [
            &ScriptClassifier::new(),
            &KeywordClassifier::new(),
            &FrequencyClassifier::new(),
        ];
        let names: Vec<&str> = classifiers.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["script", "keyword", "frequency"]);
    }
}
