use talent_models::LanguageCode;
use whatlang::Lang;

/// Languages folded into a closely related supported one.
const ALIASES: [(&str, LanguageCode); 6] = [
    ("mr", LanguageCode::Hi),
    ("ne", LanguageCode::Hi),
    ("ur", LanguageCode::Hi),
    ("gu", LanguageCode::Hi),
    ("kn", LanguageCode::Te),
    ("or", LanguageCode::Bn),
];

/// Best-effort statistical language identification.
pub trait StatisticalGuesser: Send + Sync {
    /// Language code of the most likely language, or `None` when the text
    /// is indeterminate. Codes need not be in the supported set.
    fn guess(&self, text: &str) -> Option<String>;
}

/// Trigram and script based guesser backed by `whatlang`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangGuesser;

impl WhatlangGuesser {
    pub fn new() -> Self {
        Self
    }

    fn iso_639_1(lang: Lang) -> &'static str {
        match lang {
            Lang::Eng => "en",
            Lang::Hin => "hi",
            Lang::Tam => "ta",
            Lang::Mal => "ml",
            Lang::Ben => "bn",
            Lang::Tel => "te",
            Lang::Mar => "mr",
            Lang::Nep => "ne",
            Lang::Urd => "ur",
            Lang::Guj => "gu",
            Lang::Kan => "kn",
            Lang::Ori => "or",
            other => other.code(),
        }
    }
}

impl StatisticalGuesser for WhatlangGuesser {
    fn guess(&self, text: &str) -> Option<String> {
        let info = whatlang::detect(text)?;
        Some(Self::iso_639_1(info.lang()).to_string())
    }
}

/// Fold a guessed code into the supported set; anything else is English.
pub fn resolve_guess(code: &str) -> LanguageCode {
    let code = code.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == code)
        .map(|(_, lang)| *lang)
        .unwrap_or_else(|| LanguageCode::parse_or_english(&code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(resolve_guess("mr"), LanguageCode::Hi);
        assert_eq!(resolve_guess("GU"), LanguageCode::Hi);
        assert_eq!(resolve_guess("kn"), LanguageCode::Te);
        assert_eq!(resolve_guess("or"), LanguageCode::Bn);
    }

    #[test]
    fn test_supported_and_unsupported_codes() {
        assert_eq!(resolve_guess("ml"), LanguageCode::Ml);
        assert_eq!(resolve_guess("fr"), LanguageCode::En);
        assert_eq!(resolve_guess("rus"), LanguageCode::En);
        assert_eq!(resolve_guess(""), LanguageCode::En);
    }

    #[test]
    fn test_whatlang_identifies_kannada_script() {
        let guesser = WhatlangGuesser::new();
        let guess = guesser.guess("ನನಗೆ ಕನ್ನಡ ಭಾಷೆ ತುಂಬಾ ಇಷ್ಟ");
        assert_eq!(guess.as_deref(), Some("kn"));
    }

    #[test]
    fn test_whatlang_indeterminate_input() {
        let guesser = WhatlangGuesser::new();
        assert_eq!(guesser.guess(""), None);
    }
}
