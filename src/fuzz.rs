//! Fuzzy string similarity on a 0-100 scale
//!
//! Built on the normalised Levenshtein similarity from `strsim`. Inputs are
//! compared as given; callers lowercase and trim beforehand.

use std::collections::BTreeSet;
use strsim::normalized_levenshtein;

/// Plain similarity of two strings, 0-100
pub fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

/// Best similarity of the shorter string against any same-length window of the longer
///
/// An exact substring scores 100. An empty string scores 0.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    if short.is_empty() {
        return 0.0;
    }
    if long.contains(short) {
        return 100.0;
    }

    let long_chars: Vec<char> = long.chars().collect();
    let width = short.chars().count();

    long_chars
        .windows(width)
        .map(|window| ratio(short, &window.iter().collect::<String>()))
        .fold(0.0, f64::max)
}

fn sorted_tokens(text: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

/// Similarity ignoring word order
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a).join(" "), &sorted_tokens(b).join(" "))
}

/// Similarity of the shared words against each side's extra words
///
/// When every word of one side appears in the other, the score is 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let a_tokens: BTreeSet<&str> = a.split_whitespace().collect();
    let b_tokens: BTreeSet<&str> = b.split_whitespace().collect();

    if a_tokens.is_empty() || b_tokens.is_empty() {
        return 0.0;
    }

    let shared: Vec<&str> = a_tokens.intersection(&b_tokens).copied().collect();
    let only_a: Vec<&str> = a_tokens.difference(&b_tokens).copied().collect();
    let only_b: Vec<&str> = b_tokens.difference(&a_tokens).copied().collect();

    if !shared.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100.0;
    }

    let shared = shared.join(" ");
    let combined_a = format!("{} {}", shared, only_a.join(" ")).trim().to_string();
    let combined_b = format!("{} {}", shared, only_b.join(" ")).trim().to_string();

    if shared.is_empty() {
        return ratio(&combined_a, &combined_b);
    }

    ratio(&shared, &combined_a)
        .max(ratio(&shared, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}
