//! Query normalization: fixed whole-word typo/shorthand corrections followed
//! by whitespace collapse. Runs before classification so the rule patterns
//! only ever see canonical spellings.

use regex::Regex;
use std::sync::LazyLock;

/// Misspellings and chat shorthand seen in real queries, each replaced only
/// as a whole word so substrings inside longer words stay untouched.
const CORRECTIONS: &[(&str, &str)] = &[
    ("recomend", "recommend"),
    ("reccomend", "recommend"),
    ("recommand", "recommend"),
    ("recomendation", "recommendation"),
    ("sugest", "suggest"),
    ("suggets", "suggest"),
    ("comapre", "compare"),
    ("compair", "compare"),
    ("tol", "tool"),
    ("toool", "tool"),
    ("tols", "tools"),
    ("anlytics", "analytics"),
    ("analitics", "analytics"),
    ("translat", "translate"),
    ("langauge", "language"),
    ("pls", "please"),
    ("plz", "please"),
    ("u", "you"),
    ("wat", "what"),
    ("wich", "which"),
];

static CORRECTION_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    CORRECTIONS
        .iter()
        .map(|(from, to)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(from));
            (
                Regex::new(&pattern).expect("correction regex is valid"),
                *to,
            )
        })
        .collect()
});

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Canonicalize a raw query. Never fails; identity on empty input.
pub fn normalize_query(query: &str) -> String {
    if query.is_empty() {
        return String::new();
    }

    let mut text = query.to_string();
    for (re, replacement) in CORRECTION_RES.iter() {
        text = re.replace_all(&text, *replacement).into_owned();
    }

    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrects_common_misspellings() {
        assert_eq!(
            normalize_query("Recomend a tol for anlytics"),
            "recommend a tool for analytics"
        );
    }

    #[test]
    fn leaves_substrings_inside_longer_words_alone() {
        assert_eq!(
            normalize_query("we tolerate the protocol"),
            "we tolerate the protocol"
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_query("  which   tools \t help  "), "which tools help");
    }

    #[test]
    fn empty_input_is_identity() {
        assert_eq!(normalize_query(""), "");
    }
}
