//! Language detection over a closed set of eight codes. Heuristic keyword and
//! script checks in a fixed order; first match wins, default English. Every
//! localized response table matches exhaustively on [`LanguageCode`], so a
//! missing entry is a compile error rather than a runtime gap.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    En,
    Fr,
    Es,
    De,
    Pt,
    Zh,
    Ja,
    Vi,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 8] = [
        LanguageCode::En,
        LanguageCode::Fr,
        LanguageCode::Es,
        LanguageCode::De,
        LanguageCode::Pt,
        LanguageCode::Zh,
        LanguageCode::Ja,
        LanguageCode::Vi,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Fr => "fr",
            LanguageCode::Es => "es",
            LanguageCode::De => "de",
            LanguageCode::Pt => "pt",
            LanguageCode::Zh => "zh",
            LanguageCode::Ja => "ja",
            LanguageCode::Vi => "vi",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageCode::En => "English",
            LanguageCode::Fr => "French",
            LanguageCode::Es => "Spanish",
            LanguageCode::De => "German",
            LanguageCode::Pt => "Portuguese",
            LanguageCode::Zh => "Chinese",
            LanguageCode::Ja => "Japanese",
            LanguageCode::Vi => "Vietnamese",
        }
    }

    /// Resolve a user-written language name ("french", "français", "fr") to a
    /// code. Used by the translation-intent stage to read the target out of
    /// phrases like "translate hello to french".
    pub fn from_name(name: &str) -> Option<LanguageCode> {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            "en" | "english" => Some(LanguageCode::En),
            "fr" | "french" | "français" | "francais" => Some(LanguageCode::Fr),
            "es" | "spanish" | "español" | "espanol" => Some(LanguageCode::Es),
            "de" | "german" | "deutsch" => Some(LanguageCode::De),
            "pt" | "portuguese" | "português" | "portugues" => Some(LanguageCode::Pt),
            "zh" | "chinese" | "mandarin" | "中文" => Some(LanguageCode::Zh),
            "ja" | "japanese" | "日本語" => Some(LanguageCode::Ja),
            "vi" | "vietnamese" | "tiếng việt" => Some(LanguageCode::Vi),
            _ => None,
        }
    }
}

const FRENCH_MARKERS: &[&str] = &[
    "bonjour", "merci", "s'il vous", "traduire", "comment allez", "français", "s'il te",
];
const SPANISH_MARKERS: &[&str] = &[
    "hola", "gracias", "por favor", "buenos días", "cómo estás", "español", "qué es",
];
const GERMAN_MARKERS: &[&str] = &[
    "hallo", "danke", "bitte", "guten tag", "guten morgen", "wie geht", "deutsch",
];
const PORTUGUESE_MARKERS: &[&str] = &[
    "olá", "obrigado", "obrigada", "bom dia", "português", "ajuda", "como vai",
];
const VIETNAMESE_MARKERS: &[&str] = &[
    "xin chào", "cảm ơn", "bạn", "tiếng việt", "làm ơn", "giúp",
];

fn contains_any(query: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| query.contains(m))
}

fn has_kana(query: &str) -> bool {
    query
        .chars()
        .any(|c| matches!(c, '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}'))
}

fn has_han(query: &str) -> bool {
    query.chars().any(|c| matches!(c, '\u{4E00}'..='\u{9FFF}'))
}

/// Classify the query's language. Pure; checks run in a fixed order and the
/// first hit wins. Kana is tested before Han so Japanese text with kanji
/// resolves to `Ja`; Han-only text resolves to `Zh`.
pub fn detect_language(query: &str) -> LanguageCode {
    let lower = query.to_lowercase();

    if contains_any(&lower, FRENCH_MARKERS) {
        return LanguageCode::Fr;
    }
    if contains_any(&lower, SPANISH_MARKERS) {
        return LanguageCode::Es;
    }
    if contains_any(&lower, GERMAN_MARKERS) {
        return LanguageCode::De;
    }
    if contains_any(&lower, PORTUGUESE_MARKERS) {
        return LanguageCode::Pt;
    }
    if has_kana(&lower) {
        return LanguageCode::Ja;
    }
    if has_han(&lower) {
        return LanguageCode::Zh;
    }
    if contains_any(&lower, VIETNAMESE_MARKERS) {
        return LanguageCode::Vi;
    }

    LanguageCode::En
}
