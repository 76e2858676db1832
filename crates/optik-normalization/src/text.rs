//! Cleaning, Turkish casing, diacritic folding, and collation.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

/// The 29 letters of the Turkish alphabet in collation order.
pub const TURKISH_ALPHABET: &str = "abcçdefgğhıijklmnoöprsştuüvyz";

/// Trims, drops control characters, and collapses internal whitespace.
pub fn clean(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| !c.is_control() && !is_zero_width(*c))
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// [`clean`] for optional input; `None` becomes an empty string.
pub fn clean_opt(input: Option<&str>) -> String {
    input.map(clean).unwrap_or_default()
}

fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}')
}

/// Lower-cases with Turkish rules: `I` → `ı`, `İ` → `i`.
pub fn to_lower_tr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            'I' => out.push('ı'),
            'İ' => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Upper-cases with Turkish rules: `i` → `İ`, `ı` → `I`.
pub fn to_upper_tr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            'i' => out.push('İ'),
            'ı' => out.push('I'),
            _ => out.extend(c.to_uppercase()),
        }
    }
    out
}

/// Capitalises the first letter of every space-separated word.
pub fn to_title_tr(input: &str) -> String {
    input
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = to_upper_tr(&first.to_string());
                    out.push_str(&to_lower_tr(chars.as_str()));
                    out
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces Turkish and other diacritic letters with their ASCII base
/// letter, keeping case.
///
/// Input is composed (NFC) first, Turkish letters are mapped explicitly, and
/// any remaining combining marks are stripped after decomposition.
pub fn fold_diacritics(input: &str) -> String {
    let composed: String = input.nfc().collect();
    let mapped: String = composed
        .chars()
        .map(|c| match c {
            'ç' => 'c',
            'Ç' => 'C',
            'ğ' => 'g',
            'Ğ' => 'G',
            'ı' => 'i',
            'İ' => 'I',
            'ö' => 'o',
            'Ö' => 'O',
            'ş' => 's',
            'Ş' => 'S',
            'ü' => 'u',
            'Ü' => 'U',
            other => other,
        })
        .collect();
    mapped.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}' | '\u{1AB0}'..='\u{1AFF}' | '\u{1DC0}'..='\u{1DFF}')
}

/// Comparison key: Turkish lower-cased, diacritics folded, cleaned.
///
/// `"İSTANBUL"`, `"istanbul"` and `"Istanbul"` all produce `"istanbul"`.
/// Cleaning runs last so a mark stripped from between two spaces cannot
/// leave a double space behind.
pub fn fold_key(input: &str) -> String {
    clean(&fold_diacritics(&to_lower_tr(input)))
}

/// Orders strings by the Turkish alphabet, case-insensitively.
///
/// Circumflex vowels (`â`, `î`, `û`) rank as their plain letter. Digits sort
/// before letters, characters outside the alphabet sort after `z` by code
/// point, and the raw strings break any remaining tie so the order is total.
pub fn compare_tr(a: &str, b: &str) -> Ordering {
    let left = to_lower_tr(&a.nfc().collect::<String>());
    let right = to_lower_tr(&b.nfc().collect::<String>());
    left.chars()
        .map(collation_rank)
        .cmp(right.chars().map(collation_rank))
        .then_with(|| a.cmp(b))
}

fn collation_rank(c: char) -> (u8, u32) {
    if c.is_whitespace() {
        return (0, 0);
    }
    if let Some(digit) = c.to_digit(10) {
        return (1, digit);
    }
    let c = match c {
        'â' => 'a',
        'î' => 'i',
        'û' => 'u',
        other => other,
    };
    match TURKISH_ALPHABET.chars().position(|letter| letter == c) {
        Some(pos) => (2, pos as u32),
        None => (3, c as u32),
    }
}
