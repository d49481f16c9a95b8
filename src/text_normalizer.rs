/*!
 * Cleanup of raw OCR output taken from early-modern facsimiles.
 *
 * The rules run in a fixed order, each one relying on the cleanup done by
 * the rules before it:
 * 1. Collapse whitespace runs to a single space
 * 2. Split words the OCR engine glued together (`wordNext` -> `word Next`)
 * 3. Replace the long s (`ſ`) with `s`
 * 4. Expand typographic ligatures (`ﬁ` -> `fi`, ...)
 * 5. Trim
 *
 * The word split is a heuristic and will also split legitimate camel-cased
 * tokens. It matches on Unicode letter categories, so the long s and the
 * ligature glyphs (both lowercase letters) are split in the same pass as
 * plain ASCII, which keeps `normalize` idempotent.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// @const: Any run of whitespace, Unicode aware
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

// @const: Lowercase letter directly followed by an uppercase letter
static MERGED_WORDS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\p{Ll})(\p{Lu})").unwrap()
});

/// Long s as printed until the late 18th century
const LONG_S: char = 'ſ';

/// Ligature glyphs and their letter sequences
const LIGATURES: &[(char, &str)] = &[
    ('ﬀ', "ff"),
    ('ﬁ', "fi"),
    ('ﬂ', "fl"),
    ('ﬃ', "ffi"),
    ('ﬄ', "ffl"),
    ('ﬅ', "st"),
    ('ﬆ', "st"),
];

/// Clean raw OCR text of historical typesetting artifacts.
///
/// Pure and deterministic; an empty input gives an empty output.
pub fn normalize(raw_text: &str) -> String {
    let collapsed = WHITESPACE_REGEX.replace_all(raw_text, " ");
    let split = MERGED_WORDS_REGEX.replace_all(&collapsed, "${1} ${2}");

    let mut result = String::with_capacity(split.len());
    for c in split.chars() {
        if c == LONG_S {
            result.push('s');
        } else if let Some((_, expansion)) = LIGATURES.iter().find(|(glyph, _)| *glyph == c) {
            result.push_str(expansion);
        } else {
            result.push(c);
        }
    }

    result.trim().to_string()
}
