//! Text normalization.
//!
//! Lowercases the input, splits it into word tokens, drops punctuation and
//! whitespace, expands English contractions and reduces every word to its
//! lemma. The output is the lemmas joined by single spaces.

use regex::Regex;
use std::sync::LazyLock;

use super::lemma::lemmatize;

// NOTE: expect() is acceptable here: the pattern is a literal.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{M}\p{N}_]+(?:['’][\p{L}\p{M}]+)?|['’][\p{L}\p{M}]+")
        .expect("Invalid regex: word pattern")
});

/// Clitics split off the word they are attached to.
const CLITICS: &[&str] = &["'s", "'re", "'m", "'ll", "'ve", "'d"];

/// Normalizes raw user text into a space-separated sequence of lemmas.
///
/// Pure and total: any string is accepted, and empty or whitespace-only input
/// yields an empty string. Normalizing already-normalized text is a no-op.
pub fn normalize(text: &str) -> String {
    tokens(text).join(" ")
}

/// Same as [`normalize`] but keeps the lemmas as separate tokens.
pub fn tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut lemmas = Vec::new();

    for word in WORD_PATTERN.find_iter(&lowered) {
        for piece in split_contraction(word.as_str()) {
            if !piece.chars().any(char::is_alphanumeric) {
                continue;
            }
            lemmas.push(lemmatize(&piece).into_owned());
        }
    }

    lemmas
}

/// Splits a token such as `you're` or `don't` into its word and clitic.
///
/// Apostrophes that are not part of a known contraction are removed.
fn split_contraction(token: &str) -> Vec<String> {
    if !token.contains(&['\'', '’'][..]) {
        return vec![token.to_string()];
    }
    let token = token.replace('’', "'");

    match token.as_str() {
        "can't" => return vec!["can".to_string(), "not".to_string()],
        "won't" => return vec!["will".to_string(), "not".to_string()],
        "shan't" => return vec!["shall".to_string(), "not".to_string()],
        "ain't" => return vec!["be".to_string(), "not".to_string()],
        "n't" => return vec![token],
        _ => {}
    }

    if let Some(stem) = token.strip_suffix("n't") {
        return vec![stem.to_string(), "n't".to_string()];
    }

    if let Some(pos) = token.find('\'') {
        let (head, tail) = token.split_at(pos);
        if CLITICS.contains(&tail) {
            let mut parts = Vec::with_capacity(2);
            if !head.is_empty() {
                parts.push(head.to_string());
            }
            parts.push(tail.to_string());
            return parts;
        }
    }

    vec![token.replace('\'', "")]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Hello!"), "hello");
        assert_eq!(normalize("Good   Morning, friend..."), "good morning friend");
        assert_eq!(normalize("¿¡ ... !?"), "");
    }

    #[test]
    fn test_lemmatizes_words() {
        assert_eq!(normalize("What is your name?"), "what be your name");
        assert_eq!(normalize("How old are you"), "how old be you");
        assert_eq!(normalize("Thanks"), "thank");
    }

    #[test]
    fn test_contractions() {
        assert_eq!(normalize("You're great"), "you be great");
        assert_eq!(normalize("I don't know"), "i do not know");
        assert_eq!(normalize("I can’t"), "i can not");
        assert_eq!(normalize("o'clock"), "oclock");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
    }

    #[test]
    fn test_idempotent() {
        for text in [
            "Hello there!",
            "What's your name?",
            "I needed assistance, thanks!!",
            "They're going to the stories' endings",
            "İstanbul  ΣΟΦΟΣ",
            "snake_case __ 3.14",
            "won't shan't y'all'd",
        ] {
            let once = normalize(text);
            assert_eq!(normalize(&once), once, "not idempotent for '{}'", text);
        }
    }
}
