//! Crude stop-word language guess.
//!
//! Counts whole-word hits of three short stop-word lists. A language is
//! reported only when its count is strictly greater than both others;
//! anything else, ties included, falls to Portuguese.

use crate::page::Page;
use crate::report::{CategoryChecks, CheckResult};
use crate::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ASCII word boundaries and ASCII case folding, as in a browser regex
const SPANISH: &str = r"(?i-u)\b(?:el|la|los|las|de|en|con|para|por)\b";
const ENGLISH: &str = r"(?i-u)\b(?:the|and|for|with|from|this|that)\b";
const PORTUGUESE: &str = r"(?i-u)\b(?:o|a|os|as|de|em|para|com)\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    Spanish,
    English,
    Portuguese,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Spanish => "Español",
            Language::English => "Inglés",
            Language::Portuguese => "Portugués",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageCounts {
    pub spanish: usize,
    pub english: usize,
    pub portuguese: usize,
}

impl LanguageCounts {
    pub fn dominant(&self) -> Language {
        if self.spanish > self.english && self.spanish > self.portuguese {
            Language::Spanish
        } else if self.english > self.spanish && self.english > self.portuguese {
            Language::English
        } else {
            Language::Portuguese
        }
    }
}

#[derive(Debug)]
pub struct LanguageDetector {
    spanish: Regex,
    english: Regex,
    portuguese: Regex,
}

impl LanguageDetector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            spanish: Regex::new(SPANISH)?,
            english: Regex::new(ENGLISH)?,
            portuguese: Regex::new(PORTUGUESE)?,
        })
    }

    pub fn count(&self, text: &str) -> LanguageCounts {
        LanguageCounts {
            spanish: self.spanish.find_iter(text).count(),
            english: self.english.find_iter(text).count(),
            portuguese: self.portuguese.find_iter(text).count(),
        }
    }

    pub fn detect(&self, text: &str) -> Language {
        self.count(text).dominant()
    }
}

pub(super) fn run(page: &dyn Page, body_text: &str, detector: &LanguageDetector) -> Result<CategoryChecks> {
    let mut checks = CategoryChecks::new();

    checks.insert(
        "htmlLang",
        match page.html_lang()? {
            Some(lang) => CheckResult::pass(format!("Idioma HTML: {}", lang)),
            None => CheckResult::warning("Atributo lang no definido"),
        },
    );

    let detected = detector.detect(body_text);
    checks.insert(
        "detected",
        CheckResult::pass(format!("Idioma detectado: {}", detected.display_name())),
    );
    Ok(checks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> LanguageDetector {
        LanguageDetector::new().unwrap()
    }

    #[test]
    fn counts_whole_words_case_insensitively() {
        let counts = detector().count("El precio de LA tele. Delante, Ella. The end and THIS.");
        assert_eq!(counts.spanish, 3);
        assert_eq!(counts.english, 3);
        assert_eq!(counts.portuguese, 1);
    }

    #[test]
    fn ascii_word_boundaries_split_accented_words() {
        // "ã" is not an ASCII word character, so the trailing "o" is a word
        let counts = detector().count("não");
        assert_eq!(counts.portuguese, 1);
    }

    #[test]
    fn strict_majority_wins() {
        let c = LanguageCounts { spanish: 10, english: 3, portuguese: 2 };
        assert_eq!(c.dominant(), Language::Spanish);
        let c = LanguageCounts { spanish: 1, english: 4, portuguese: 2 };
        assert_eq!(c.dominant(), Language::English);
    }

    #[test]
    fn ties_fall_to_portuguese() {
        // Kept as observed: equal counts are not broken in favour of either
        // leading language.
        let c = LanguageCounts { spanish: 5, english: 5, portuguese: 5 };
        assert_eq!(c.dominant(), Language::Portuguese);
        let c = LanguageCounts { spanish: 5, english: 5, portuguese: 0 };
        assert_eq!(c.dominant(), Language::Portuguese);
        assert_eq!(LanguageCounts::default().dominant(), Language::Portuguese);
    }

    #[test]
    fn spanish_copy_is_detected() {
        let text = "Descubre el nuevo Galaxy con la mejor cámara para tus fotos de noche en la ciudad";
        assert_eq!(detector().detect(text), Language::Spanish);
    }
}
