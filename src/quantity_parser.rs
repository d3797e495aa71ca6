//! # Quantity Parser
//!
//! Reads the amount, unit and container of a recipe line.
//!
//! ## Features
//!
//! - Integers, decimals, ASCII fractions ("1/2"), mixed fractions ("1 1/2")
//! - Vulgar fraction glyphs, alone ("½") or after a whole number ("2½")
//! - Packaged quantities: "2 (6 ounce) cans" → 2 × 6 oz cans
//! - Measured quantities: "2 cups", "3 cloves"
//!
//! Parsing never fails: a line without a recognisable quantity yields a
//! [`ParsedQuantity`] whose fields are all empty except `original`.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_cart::quantity_parser::parse_quantity;
//!
//! let qty = parse_quantity("2 (6 ounce) cans tomato paste");
//! assert_eq!(qty.count, Some(2.0));
//! assert_eq!(qty.amount, Some(6.0));
//! assert_eq!(qty.unit.as_deref(), Some("oz"));
//! assert_eq!(qty.container.as_deref(), Some("can"));
//! assert_eq!(qty.total_amount, Some(12.0));
//! ```

use crate::canonical_tables::{canonical_unit, fraction_value};
use crate::ingredient_model::ParsedQuantity;
use crate::measurement_patterns::{
    COMPLEX_QUANTITY, MIXED_FRACTION, NUMBER_TOKEN, SIMPLE_FRACTION, SIMPLE_QUANTITY,
};
use log::{debug, trace};
use regex::Captures;

/// Parse a number token: "2", "1.5", "1/2", "1 1/2", "½", "2½"
///
/// Returns `None` for anything else, including zero denominators.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if !NUMBER_TOKEN.is_match(text) {
        return None;
    }

    // Glyph, possibly after a whole number
    if let Some((index, glyph)) = text.char_indices().find(|(_, c)| fraction_value(*c).is_some()) {
        let value = fraction_value(glyph)?;
        let before = text[..index].trim();
        if before.is_empty() {
            return Some(value);
        }
        return before.parse::<f64>().ok().map(|whole| whole + value);
    }

    if let Some(caps) = MIXED_FRACTION.captures(text) {
        let whole: f64 = caps[1].parse().ok()?;
        return ratio(&caps[2], &caps[3]).map(|fraction| whole + fraction);
    }

    if let Some(caps) = SIMPLE_FRACTION.captures(text) {
        return ratio(&caps[1], &caps[2]);
    }

    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn ratio(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Extract quantity information from an ingredient line
///
/// The packaged grammar is tried first, then the measured grammar. In the
/// measured grammar the word right after the first number must be a known
/// unit: "3 cloves garlic" parses, "12 lasagna noodles" does not.
pub fn parse_quantity(text: &str) -> ParsedQuantity {
    if let Some(caps) = COMPLEX_QUANTITY.captures(text) {
        if let Some(unit) = canonical_unit(&caps["unit"]) {
            // A zero count or size leaves the whole line unparsed
            let Some(parsed) = parse_packaged(text, &caps, unit) else {
                trace!("Non-positive packaged quantity in '{}'", text);
                return ParsedQuantity::unparsed(text);
            };
            debug!("Packaged quantity in '{}': {}", text, parsed);
            return parsed;
        }
    }

    if let Some(parsed) = parse_measured(text) {
        debug!("Measured quantity in '{}': {}", text, parsed);
        return parsed;
    }

    trace!("No quantity found in '{}'", text);
    ParsedQuantity::unparsed(text)
}

fn parse_packaged(text: &str, caps: &Captures<'_>, unit: &str) -> Option<ParsedQuantity> {
    let count = parse_number(&caps["count"]).filter(|v| *v > 0.0)?;
    let amount = parse_number(&caps["amount"]).filter(|v| *v > 0.0)?;
    let container = normalize_container(&caps["container"]);

    Some(ParsedQuantity::packaged(text, count, amount, unit, &container))
}

fn parse_measured(text: &str) -> Option<ParsedQuantity> {
    let caps = SIMPLE_QUANTITY.captures(text)?;
    let unit = measured_unit(&caps)?;
    let amount = parse_number(&caps["amount"]).filter(|v| *v > 0.0)?;

    Some(ParsedQuantity::measured(text, amount, unit))
}

/// Resolve the unit following a number: two-word units ("fl oz") first
fn measured_unit(caps: &Captures<'_>) -> Option<&'static str> {
    let word = &caps["word"];
    if let Some(next) = caps.name("next") {
        let phrase = format!("{} {}", word, next.as_str());
        if let Some(unit) = canonical_unit(&phrase) {
            return Some(unit);
        }
    }
    canonical_unit(word)
}

/// Singular container name: a known unit alias, otherwise the word without a plural "s"
fn normalize_container(word: &str) -> String {
    if let Some(unit) = canonical_unit(word) {
        return unit.to_string();
    }
    let word = word.to_lowercase();
    match word.strip_suffix('s') {
        Some(singular) if singular.len() > 1 && !singular.ends_with('s') => singular.to_string(),
        _ => word,
    }
}

/// Format an amount as a range with a margin
///
/// Precision follows magnitude: whole numbers from 10, one decimal from 1,
/// two decimals below that.
///
/// ```rust
/// use recipe_cart::quantity_parser::format_quantity_range;
///
/// assert_eq!(format_quantity_range(Some(12.0), "oz", 0.2), "10-14 oz");
/// assert_eq!(format_quantity_range(None, "oz", 0.2), "unknown amount");
/// ```
pub fn format_quantity_range(amount: Option<f64>, unit: &str, margin: f64) -> String {
    let Some(amount) = amount else {
        return "unknown amount".to_string();
    };

    let low = amount * (1.0 - margin);
    let high = amount * (1.0 + margin);

    let decimals = if amount >= 10.0 {
        0
    } else if amount >= 1.0 {
        1
    } else {
        2
    };
    let scale = 10f64.powi(decimals);
    let low = (low * scale).round() / scale;
    let high = (high * scale).round() / scale;

    format!("{}-{} {}", low, high, unit)
}
