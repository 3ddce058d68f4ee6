//! Title to slug transliteration.
//!
//! Follows the pytils slug rules so that `Новая заметка` becomes
//! `novaya-zametka`:
//! 1. lowercase, then `&` (or `&amp;`) becomes ` and `;
//! 2. every run of whitespace and hyphens becomes a single `-`;
//! 3. characters outside the slug alphabet are dropped;
//! 4. Cyrillic is transliterated and leftover non-word symbols removed.
//!
//! Hyphens at the ends survive; only whitespace is trimmed.

use crate::model::note::NOTE_SLUG_MAX_CHARS;
use once_cell::sync::Lazy;
use regex::Regex;

static AMPERSAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&amp;|&").expect("valid ampersand regex"));
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-\s]+").expect("valid separator regex"));
static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid non-word regex"));
static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid slug regex"));

fn transliterate_char(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'і' => "i",
        'ї' => "yi",
        'є' => "ye",
        'ґ' => "g",
        '№' => "#",
        '«' | '»' | '“' | '”' | '„' => "\"",
        '—' | '–' => "-",
        _ => return None,
    };
    Some(latin)
}

/// Transliterates text into ASCII, leaving characters without a mapping
/// untouched.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars().flat_map(char::to_lowercase) {
        match transliterate_char(ch) {
            Some(latin) => out.push_str(latin),
            None => out.push(ch),
        }
    }
    out
}

/// Builds a URL slug from arbitrary text.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let spelled = AMPERSAND_RE.replace_all(&lowered, " and ");
    let hyphenated = SEPARATOR_RE.replace_all(&spelled, "-");
    let kept: String = hyphenated
        .chars()
        .filter(|ch| in_slug_alphabet(*ch))
        .collect();
    let ascii = transliterate(&kept);
    NON_WORD_RE.replace_all(&ascii, "").trim().to_string()
}

fn in_slug_alphabet(ch: char) -> bool {
    ch.is_ascii_lowercase()
        || ch.is_ascii_digit()
        || ch == '-'
        || ch == '_'
        || transliterate_char(ch).is_some()
}

/// Derives the slug stored for a note whose author left the field blank.
pub fn derive_note_slug(title: &str) -> String {
    slugify(title).chars().take(NOTE_SLUG_MAX_CHARS).collect()
}

/// Returns whether `value` is a valid user-supplied slug.
pub fn is_valid_slug(value: &str) -> bool {
    SLUG_RE.is_match(value)
}
