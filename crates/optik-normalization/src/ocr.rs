//! Scanner glyph-confusion repair for decoded text fields.
//!
//! Optical readers and legacy code pages garble Turkish letters in two ways:
//! code-page mojibake (`Þ` for `Ş`, `Ý` for `İ`) and glyph look-alikes (`$`
//! for `Ş`, `1` for `I`/`ı`). Look-alikes resolve differently depending on
//! where they sit in a word and whether the word is written in capitals, so
//! every rule carries a target per context.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::text::{clean, fold_diacritics, to_lower_tr, to_title_tr, to_upper_tr};

/// One glyph substitution with per-context targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrRule {
    /// The garbled character as it appears in scanner output.
    pub symbol: char,
    /// Replacement when the symbol starts a word.
    pub word_start: char,
    /// Replacement inside a word written in capitals.
    pub upper: char,
    /// Replacement inside a word containing lower-case letters.
    pub lower: char,
    /// Only apply inside words made mostly of letters, so that numbers and
    /// labels such as `2024`, `10A` or `$5` are left alone.
    pub within_letters: bool,
}

impl OcrRule {
    /// Rule that resolves to the same letter in every context.
    pub fn fixed(symbol: char, target: char) -> Self {
        Self {
            symbol,
            word_start: target,
            upper: target,
            lower: target,
            within_letters: false,
        }
    }

    /// Rule whose target depends on position and case.
    pub fn contextual(symbol: char, word_start: char, upper: char, lower: char) -> Self {
        Self {
            symbol,
            word_start,
            upper,
            lower,
            within_letters: true,
        }
    }
}

/// Result of correcting many values at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchCorrection {
    pub values: Vec<String>,
    /// Values whose letters changed (whitespace cleanup alone is not counted).
    pub changed: usize,
}

/// Context-aware OCR corrector with a curated name fallback.
///
/// Construct once per import and share by reference; correction never
/// mutates the corrector.
#[derive(Debug, Clone)]
pub struct OcrCorrector {
    rules: Vec<OcrRule>,
    /// Folded upper-case key → correct upper-case spelling.
    name_corrections: BTreeMap<String, String>,
    /// Upper-case spellings that must never be rewritten.
    known_names: BTreeSet<String>,
}

const CODE_PAGE_CONFUSIONS: [(char, char); 6] = [
    ('Ý', 'İ'),
    ('ý', 'ı'),
    ('Þ', 'Ş'),
    ('þ', 'ş'),
    ('Ð', 'Ğ'),
    ('ð', 'ğ'),
];

const LOOK_ALIKES: [(char, char, char, char); 5] = [
    // symbol, word start, mid-word capitals, mid-word lower case
    ('$', 'Ş', 'Ş', 'ş'),
    ('1', 'İ', 'I', 'ı'),
    ('0', 'Ö', 'O', 'o'),
    ('|', 'İ', 'I', 'l'),
    ('¢', 'Ç', 'Ç', 'ç'),
];

const COMMON_NAMES: [(&str, &str); 36] = [
    ("AYSE", "AYŞE"),
    ("BUSRA", "BÜŞRA"),
    ("CAGLA", "ÇAĞLA"),
    ("CAGLAR", "ÇAĞLAR"),
    ("CELIK", "ÇELİK"),
    ("CIGDEM", "ÇİĞDEM"),
    ("DOGAN", "DOĞAN"),
    ("ELIF", "ELİF"),
    ("EMINE", "EMİNE"),
    ("ERDOGAN", "ERDOĞAN"),
    ("GOKHAN", "GÖKHAN"),
    ("GUL", "GÜL"),
    ("GULSEN", "GÜLŞEN"),
    ("HUSEYIN", "HÜSEYİN"),
    ("IBRAHIM", "İBRAHİM"),
    ("IREM", "İREM"),
    ("ISIK", "IŞIK"),
    ("ISMAIL", "İSMAİL"),
    ("KOC", "KOÇ"),
    ("MUGE", "MÜGE"),
    ("OMER", "ÖMER"),
    ("OZGUR", "ÖZGÜR"),
    ("OZLEM", "ÖZLEM"),
    ("OZTURK", "ÖZTÜRK"),
    ("SAHIN", "ŞAHİN"),
    ("SEVGUL", "SEVGÜL"),
    ("SEYMA", "ŞEYMA"),
    ("SUKRAN", "ŞÜKRAN"),
    ("SUKRU", "ŞÜKRÜ"),
    ("TUGCE", "TUĞÇE"),
    ("UMIT", "ÜMİT"),
    ("YAGMUR", "YAĞMUR"),
    ("YILDIRIM", "YILDIRIM"),
    ("YILDIZ", "YILDIZ"),
    ("YILMAZ", "YILMAZ"),
    ("ZEHRA", "ZEHRA"),
];

impl Default for OcrCorrector {
    fn default() -> Self {
        let mut corrector = Self::empty();
        for (symbol, target) in CODE_PAGE_CONFUSIONS {
            corrector = corrector.with_rule(OcrRule::fixed(symbol, target));
        }
        for (symbol, start, upper, lower) in LOOK_ALIKES {
            corrector = corrector.with_rule(OcrRule::contextual(symbol, start, upper, lower));
        }
        for (garbled, correct) in COMMON_NAMES {
            corrector = corrector.with_name_correction(garbled, correct);
        }
        corrector
    }
}

impl OcrCorrector {
    /// Corrector with no rules and no names; only Unicode composition and
    /// whitespace cleanup apply.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            name_corrections: BTreeMap::new(),
            known_names: BTreeSet::new(),
        }
    }

    /// Adds or replaces the rule for `rule.symbol`.
    #[must_use]
    pub fn with_rule(mut self, rule: OcrRule) -> Self {
        self.rules.retain(|existing| existing.symbol != rule.symbol);
        self.rules.push(rule);
        self
    }

    /// Adds a name correction. The correct spelling also becomes a known name.
    #[must_use]
    pub fn with_name_correction(mut self, garbled: &str, correct: &str) -> Self {
        let correct = to_upper_tr(&clean(correct));
        self.name_corrections
            .insert(name_key(garbled), correct.clone());
        self.known_names.insert(correct);
        self
    }

    /// Protects a spelling from the name fallback.
    #[must_use]
    pub fn with_known_name(mut self, name: &str) -> Self {
        self.known_names.insert(to_upper_tr(&clean(name)));
        self
    }

    pub fn rules(&self) -> &[OcrRule] {
        &self.rules
    }

    /// Corrects one decoded token (a name, a class label, ...).
    ///
    /// Steps: compose combining sequences, clean whitespace, apply glyph
    /// rules per word, then look each word up in the name list unless it is
    /// already a known-good spelling. Unmatched words pass through.
    pub fn correct(&self, token: &str) -> String {
        let composed: String = token.nfc().collect();
        clean(&composed)
            .split(' ')
            .map(|word| self.correct_name(&self.apply_rules(word)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Corrects every value and counts how many changed.
    pub fn correct_batch<I, S>(&self, values: I) -> BatchCorrection
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut batch = BatchCorrection::default();
        for value in values {
            let original = clean(&value.as_ref().nfc().collect::<String>());
            let corrected = self.correct(value.as_ref());
            if corrected != original {
                batch.changed += 1;
            }
            batch.values.push(corrected);
        }
        tracing::debug!(
            total = batch.values.len(),
            changed = batch.changed,
            "OCR batch correction finished"
        );
        batch
    }

    fn rule_for(&self, symbol: char) -> Option<&OcrRule> {
        self.rules.iter().find(|rule| rule.symbol == symbol)
    }

    fn apply_rules(&self, word: &str) -> String {
        if word.is_empty() || self.rules.is_empty() {
            return word.to_string();
        }

        let mut letters = 0usize;
        let mut look_alikes = 0usize;
        let mut has_lower = false;
        for c in word.chars() {
            match self.rule_for(c) {
                Some(rule) if rule.within_letters => look_alikes += 1,
                Some(_) => {}
                None if c.is_alphabetic() => {
                    letters += 1;
                    has_lower |= c.is_lowercase();
                }
                None => {}
            }
        }
        // Words made mostly of digits/symbols ("10A", "$5") are not names.
        let mostly_letters = letters > look_alikes;

        word.chars()
            .enumerate()
            .map(|(pos, c)| match self.rule_for(c) {
                Some(rule) if rule.within_letters && !mostly_letters => c,
                Some(rule) if pos == 0 => rule.word_start,
                Some(rule) if has_lower => rule.lower,
                Some(rule) => rule.upper,
                None => c,
            })
            .collect()
    }

    fn correct_name(&self, word: &str) -> String {
        if word.is_empty() || !word.chars().any(char::is_alphabetic) {
            return word.to_string();
        }
        let upper = to_upper_tr(word);
        if self.known_names.contains(&upper) {
            return word.to_string();
        }
        let Some(correct) = self.name_corrections.get(&name_key(word)) else {
            return word.to_string();
        };

        let has_lower = word.chars().any(char::is_lowercase);
        let has_upper = word.chars().any(char::is_uppercase);
        if !has_lower {
            correct.clone()
        } else if !has_upper {
            to_lower_tr(correct)
        } else {
            to_title_tr(&to_lower_tr(correct))
        }
    }
}

fn name_key(word: &str) -> String {
    fold_diacritics(&to_upper_tr(&clean(word)))
}
