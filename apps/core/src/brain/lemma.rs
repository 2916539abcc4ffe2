//! Rule-based English lemmatizer.
//!
//! Irregular forms come from a lookup table; regular plurals and third-person
//! verb forms are stripped by suffix rules. Rules are applied until the word
//! stops changing, so the lemma of a lemma is always itself.

use std::borrow::Cow;

/// Irregular inflections and contraction remnants mapped to their base form.
///
/// No value may appear as a key.
const IRREGULAR: &[(&str, &str)] = &[
    // be
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    // have
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    // do
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("doing", "do"),
    // go
    ("goes", "go"),
    ("went", "go"),
    ("gone", "go"),
    ("going", "go"),
    // common irregular verbs
    ("said", "say"),
    ("says", "say"),
    ("made", "make"),
    ("making", "make"),
    ("got", "get"),
    ("getting", "get"),
    ("knew", "know"),
    ("known", "know"),
    ("thought", "think"),
    ("took", "take"),
    ("taken", "take"),
    ("saw", "see"),
    ("seen", "see"),
    ("came", "come"),
    ("coming", "come"),
    ("gave", "give"),
    ("given", "give"),
    ("told", "tell"),
    ("felt", "feel"),
    ("left", "leave"),
    ("meant", "mean"),
    ("needed", "need"),
    ("needing", "need"),
    ("wanted", "want"),
    ("wanting", "want"),
    ("helped", "help"),
    ("helping", "help"),
    ("thanked", "thank"),
    ("called", "call"),
    ("named", "name"),
    ("'ll", "will"),
    ("'d", "would"),
    ("'ve", "have"),
    ("'re", "be"),
    ("'m", "be"),
    ("'s", "be"),
    ("n't", "not"),
    // irregular plurals
    ("children", "child"),
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    // comparatives
    ("older", "old"),
    ("oldest", "old"),
];

/// Words ending in `s` that are already base forms.
const S_EXCEPTIONS: &[&str] = &[
    "always", "as", "bus", "gas", "his", "its", "lens", "news", "perhaps", "plus", "series",
    "species", "this", "thus", "us", "yes", "whereas", "sometimes", "towards", "afterwards",
];

/// Upper bound on rewrite steps; each step shortens the word or jumps to a
/// table value, so real words settle in one or two.
const MAX_STEPS: usize = 4;

/// Returns the base dictionary form of a lowercased word.
pub fn lemmatize(word: &str) -> Cow<'_, str> {
    let mut current: Cow<'_, str> = Cow::Borrowed(word);
    for _ in 0..MAX_STEPS {
        match step(&current) {
            Some(next) if next != current.as_ref() => current = Cow::Owned(next),
            _ => break,
        }
    }
    current
}

/// Applies the first matching rule, if any.
fn step(word: &str) -> Option<String> {
    if let Some((_, base)) = IRREGULAR.iter().find(|(form, _)| *form == word) {
        return Some((*base).to_string());
    }
    strip_plural(word)
}

fn strip_plural(word: &str) -> Option<String> {
    if word.chars().count() <= 3 || S_EXCEPTIONS.contains(&word) {
        return None;
    }
    if !word.chars().all(char::is_alphabetic) {
        return None;
    }

    if let Some(stem) = word.strip_suffix("ies") {
        return Some(format!("{}y", stem));
    }
    if let Some(stem) = word.strip_suffix("es") {
        if stem.ends_with("ss")
            || stem.ends_with('x')
            || stem.ends_with('z')
            || stem.ends_with("ch")
            || stem.ends_with("sh")
        {
            return Some(stem.to_string());
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return None;
    }
    word.strip_suffix('s').map(str::to_string)
}
