//! # Measurement Patterns Module
//!
//! This module contains the compiled grammars used to read quantities and to
//! strip them from ingredient lines.
//!
//! ## Number grammar
//!
//! A number token is the first alternative that matches, in this order:
//!
//! 1. mixed ASCII fraction (`1 1/2`)
//! 2. whole number followed by a fraction glyph (`2½`, `1 ½`)
//! 3. ASCII fraction (`3/4`)
//! 4. decimal (`1.5`, `.5`)
//! 5. integer (`12`)
//! 6. lone fraction glyph (`¾`)
//!
//! ## Quantity grammars
//!
//! The complex grammar (`2 (6 ounce) cans`) must be tried before the simple
//! grammar (`2 cups`); the simple grammar would otherwise read the inner
//! `6 ounce` as the whole quantity.

use crate::canonical_tables::{fraction_glyphs, PREP_WORDS, SUFFIX_WORDS, TRAILING_QUALIFIERS, UNIT_ALIASES_BY_LENGTH};
use lazy_static::lazy_static;
use regex::Regex;

/// Build the ordered number alternatives for the given glyph class
fn number_pattern(glyphs: &str) -> String {
    format!(
        r"(?:[0-9]+\s+[0-9]+/[0-9]+|[0-9]+\s*[{g}]|[0-9]+/[0-9]+|[0-9]+\.[0-9]+|\.[0-9]+|[0-9]+|[{g}])",
        g = glyphs
    )
}

/// Join words into a regex alternation, escaping each one
fn alternation<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    words
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<String>>()
        .join("|")
}

lazy_static! {
    static ref NUMBER: String = number_pattern(&fraction_glyphs());

    /// A whole number token, anchored at both ends
    pub static ref NUMBER_TOKEN: Regex = Regex::new(&format!(r"^\s*{}\s*$", *NUMBER))
        .expect("Number token pattern should be valid");

    /// Mixed ASCII fraction: whole, numerator, denominator
    pub static ref MIXED_FRACTION: Regex = Regex::new(r"^([0-9]+)\s+([0-9]+)/([0-9]+)$")
        .expect("Mixed fraction pattern should be valid");

    /// Plain ASCII fraction: numerator, denominator
    pub static ref SIMPLE_FRACTION: Regex = Regex::new(r"^([0-9]+)/([0-9]+)$")
        .expect("Simple fraction pattern should be valid");

    /// `<count> (<amount> <unit>) <container>` anywhere in a line
    pub static ref COMPLEX_QUANTITY: Regex = Regex::new(&format!(
        r"(?i)(?P<count>{n})\s*\(\s*(?P<amount>{n})\s*-?\s*(?P<unit>[a-z][a-z.\s]*?)\s*\)\s*(?P<container>[a-z]+)",
        n = *NUMBER
    ))
    .expect("Complex quantity pattern should be valid");

    /// `<amount> <unit word> [<next word>]` at the first number followed by a word
    pub static ref SIMPLE_QUANTITY: Regex = Regex::new(&format!(
        r"(?i)(?P<amount>{n})\s*(?P<word>[a-z]+)(?P<dot>\.)?(?:\s+(?P<next>[a-z]+))?",
        n = *NUMBER
    ))
    .expect("Simple quantity pattern should be valid");

    /// Leading complex quantity with its container word
    pub static ref COMPLEX_PREFIX: Regex = Regex::new(&format!(
        r"(?i)^{n}\s*\([^)]*\)\s*[a-z]+\s*",
        n = *NUMBER
    ))
    .expect("Complex prefix pattern should be valid");

    /// Parenthetical aside such as `(all-purpose)`
    pub static ref PARENTHETICAL: Regex = Regex::new(r"\([^)]*\)")
        .expect("Parenthetical pattern should be valid");

    /// Leading numeric token, including ranges like `1-2` or `1.5-2`
    ///
    /// Ranges come first so the decimal alternative cannot stop at `1.5`.
    pub static ref LEADING_NUMBER: Regex = Regex::new(&format!(
        r"^(?:[0-9]+(?:\.[0-9]+)?\s*-\s*[0-9]+(?:\.[0-9]+)?|[0-9]+\s+[0-9]+/[0-9]+|[0-9]+\s*[{g}]|[0-9]+/[0-9]+|[0-9]+\.[0-9]+|[{g}]|[0-9]+)\s*",
        g = fraction_glyphs()
    ))
    .expect("Leading number pattern should be valid");

    /// Leading unit word, optionally pluralised and followed by "of"
    pub static ref UNIT_PREFIX: Regex = Regex::new(&format!(
        r"(?i)^(?:{})\.?s?\s+(?:of\s+)?",
        alternation(UNIT_ALIASES_BY_LENGTH.iter().copied())
    ))
    .expect("Unit prefix pattern should be valid");

    /// One leading preparation adjective
    pub static ref PREP_PREFIX: Regex = Regex::new(&format!(
        r"(?i)^(?:{})\s+",
        alternation(PREP_WORDS.iter().copied())
    ))
    .expect("Prep prefix pattern should be valid");

    /// Comma-introduced trailing qualifier and everything after it
    pub static ref TRAILING_QUALIFIER: Regex = Regex::new(&format!(
        r"(?i),\s*(?:{}).*$",
        alternation(TRAILING_QUALIFIERS.iter().copied())
    ))
    .expect("Trailing qualifier pattern should be valid");

    /// Descriptor noun as the final word
    pub static ref DESCRIPTOR_SUFFIX: Regex = Regex::new(&format!(
        r"(?i)\s+(?:{})$",
        alternation(SUFFIX_WORDS.iter().copied())
    ))
    .expect("Descriptor suffix pattern should be valid");

    /// Package size printed in a product title (`16 oz`, `1.5-lb`, `500g`)
    pub static ref PRODUCT_SIZE: Regex = Regex::new(
        r"(?i)([0-9]+(?:\.[0-9]+)?)\s*-?\s*(fl\.?\s*oz|ounces?|oz|pounds?|lbs?|kg|grams?|g)\b"
    )
    .expect("Product size pattern should be valid");
}
