//! Deciding whether an utterance is a literal language-switch command,
//! and which language such a command selects.

use std::fmt::Display;

/// Normalized language preference. Four accepted switch tokens collapse
/// onto these two codes; see [`resolve_target_language`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LanguageCode {
    #[default]
    En,
    Es,
}

impl Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            LanguageCode::En => "en",
            LanguageCode::Es => "es",
        };
        f.write_str(code)
    }
}

const ENGLISH_TOKENS: [&str; 2] = ["en", "in"];
const SPANISH_TOKENS: [&str; 2] = ["es", "it"];

/// True iff the utterance is exactly one of the four switch tokens,
/// ignoring case and surrounding whitespace. Locale names are not parsed;
/// "english" is an ordinary utterance.
#[must_use]
pub fn is_language_switch(text: &str) -> bool {
    let token = text.trim().to_lowercase();
    ENGLISH_TOKENS.contains(&token.as_str()) || SPANISH_TOKENS.contains(&token.as_str())
}

/// The language a switch command selects. Only meaningful for text that
/// [`is_language_switch`] accepted.
#[must_use]
pub fn resolve_target_language(text: &str) -> LanguageCode {
    let token = text.trim().to_lowercase();
    if ENGLISH_TOKENS.contains(&token.as_str()) {
        LanguageCode::En
    } else {
        LanguageCode::Es
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_all_four_tokens() {
        for token in ["en", "es", "in", "it", "EN", " Es ", "\tIT\n"] {
            assert!(is_language_switch(token), "{token:?} should classify as a switch");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for text in ["", "  ", "english", "en-US", "en gb", "ens", "hola", "set my language to es"] {
            assert!(!is_language_switch(text), "{text:?} should not classify as a switch");
        }
    }

    #[test]
    fn resolves_tokens_to_normalized_codes() {
        assert_eq!(resolve_target_language("en"), LanguageCode::En);
        assert_eq!(resolve_target_language("in"), LanguageCode::En);
        assert_eq!(resolve_target_language("es"), LanguageCode::Es);
        assert_eq!(resolve_target_language("it"), LanguageCode::Es);
    }

    #[test]
    fn resolution_normalizes_case_and_whitespace() {
        assert_eq!(resolve_target_language(" IN "), LanguageCode::En);
        assert_eq!(resolve_target_language("It"), LanguageCode::Es);
    }
}
