//! # Product Matcher
//!
//! Scores storefront product titles against a search query and ranks them.
//!
//! ## Scoring
//!
//! The base score is the best of three fuzzy measures (partial substring,
//! word order insensitive, word set) on the lowercased strings. A bonus of up
//! to 10 points rewards query words found in the title. Two penalties then
//! push down products of the wrong kind:
//!
//! - 40 points per disqualifying word for known ingredients ("sausage" vs "soup")
//! - 20 points when a short query meets a processed-food word ("sauce", "mix", ...)
//!
//! Scores are rounded to one decimal and never fall below 0.
//!
//! ```rust
//! use recipe_cart::matcher::calculate_confidence;
//!
//! assert!(calculate_confidence("basil", "Fresh Basil Leaves, 0.75 oz") > 70.0);
//! ```

use crate::canonical_tables::{GENERAL_NEGATIVES, NEGATIVE_KEYWORDS};
use crate::fuzz::{partial_ratio, token_set_ratio, token_sort_ratio};
use crate::ingredient_model::{CandidateProduct, RankedResultSet};
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::HashSet;

const MAX_WORD_BONUS: f64 = 10.0;
const NEGATIVE_KEYWORD_PENALTY: f64 = 40.0;
const PROCESSED_FOOD_PENALTY: f64 = 20.0;

/// Queries with at most this many words are treated as raw ingredients
const RAW_QUERY_MAX_WORDS: usize = 2;

fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric() && c != '.').trim_end_matches('.'))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Confidence (0-100) that a product title matches the query
pub fn calculate_confidence(query: &str, title: &str) -> f64 {
    let query = query.trim().to_lowercase();
    let title = title.trim().to_lowercase();
    if query.is_empty() || title.is_empty() {
        return 0.0;
    }

    let best_fuzzy = partial_ratio(&query, &title)
        .max(token_sort_ratio(&query, &title))
        .max(token_set_ratio(&query, &title));

    let query_words = word_set(&query);
    let title_words = word_set(&title);

    let bonus = if query_words.is_empty() {
        0.0
    } else {
        let matching = query_words.intersection(&title_words).count();
        matching as f64 / query_words.len() as f64 * MAX_WORD_BONUS
    };

    let mut score = (best_fuzzy + bonus).min(100.0);

    for (keyword, negatives) in NEGATIVE_KEYWORDS {
        if !query.contains(keyword) {
            continue;
        }
        for negative in negatives.iter() {
            if !query.contains(negative) && title_words.contains(*negative) {
                debug!("Penalty: '{}' in title '{}' but not in query '{}'", negative, title, query);
                score -= NEGATIVE_KEYWORD_PENALTY;
            }
        }
    }

    if query_words.len() <= RAW_QUERY_MAX_WORDS {
        let processed = GENERAL_NEGATIVES
            .iter()
            .any(|word| title_words.contains(*word) && !query_words.contains(*word));
        if processed {
            trace!("Processed-food penalty for '{}'", title);
            score -= PROCESSED_FOOD_PENALTY;
        }
    }

    ((score * 10.0).round() / 10.0).max(0.0)
}

/// Parse a printed price such as "$1,299.99"
///
/// ```rust
/// use recipe_cart::matcher::parse_price;
///
/// assert_eq!(parse_price("$3.49"), Some(3.49));
/// assert_eq!(parse_price("N/A"), None);
/// ```
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("n/a") {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

fn compare_ranked(a: &CandidateProduct, b: &CandidateProduct) -> Ordering {
    b.confidence
        .partial_cmp(&a.confidence)
        .unwrap_or(Ordering::Equal)
        .then_with(|| match (a.price_float, b.price_float) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Score every candidate against the query and sort best first
///
/// Ties in confidence go to the cheaper product; products without a
/// readable price come last among equals.
pub fn rank_products_by_confidence(query: &str, mut products: Vec<CandidateProduct>) -> RankedResultSet {
    for product in products.iter_mut() {
        product.confidence = calculate_confidence(query, &product.title);
        if product.price_float.is_none() {
            product.price_float = product.price.as_deref().and_then(parse_price);
        }
        trace!("{:>5.1} {}", product.confidence, product.title);
    }

    products.sort_by(compare_ranked);
    debug!("Ranked {} products for '{}'", products.len(), query);

    RankedResultSet { products }
}

/// Short display form of a confidence score, e.g. "✓  92%"
pub fn format_confidence(confidence: f64) -> String {
    let indicator = if confidence >= 80.0 {
        "✓"
    } else if confidence >= 60.0 {
        "~"
    } else {
        "?"
    };
    format!("{} {:>4.0}%", indicator, confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match_scores_high() {
        let score = calculate_confidence("basil", "Fresh Basil Leaves, 0.75 oz");
        assert!(score > 70.0, "score was {score}");
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_negative_keyword_penalty() {
        let penalised = calculate_confidence("sausage", "Italian Sausage Soup Mix");
        let plain = calculate_confidence("sausage", "Italian Sausage Links");
        assert!(penalised < plain);
        // 100 - 40 (soup) - 20 (processed food)
        assert_eq!(penalised, 40.0);
    }

    #[test]
    fn test_negative_word_in_query_is_not_penalised() {
        let score = calculate_confidence("chicken soup", "Chicken Noodle Soup");
        let with_noodle = calculate_confidence("chicken", "Chicken Noodle Soup");
        assert!(score > with_noodle);
    }

    #[test]
    fn test_processed_penalty_only_for_short_queries() {
        let short = calculate_confidence("basil", "Fresh Basil Leaves Sauce");
        assert_eq!(short, 80.0);
        let long = calculate_confidence("fresh basil leaves", "Fresh Basil Leaves Sauce");
        assert_eq!(long, 100.0);
    }

    #[test]
    fn test_score_bounds() {
        let pairs = [
            ("", "anything"),
            ("x", ""),
            ("sausage", "Sausage Pizza Sauce Soup Seasoning Ravioli Lasagna Mix"),
            ("ground beef", "Ground Beef 80/20, 1 lb"),
            ("milk", "Chocolate Milk Cookie Cracker Dip"),
        ];
        for (query, title) in pairs {
            let score = calculate_confidence(query, title);
            assert!((0.0..=100.0).contains(&score), "{query} / {title}: {score}");
        }
    }

    #[test]
    fn test_partial_word_bonus() {
        let all = calculate_confidence("tomato paste", "Tomato Paste 6 oz");
        let some = calculate_confidence("tomato paste", "Tomato Puree 6 oz");
        assert!(all > some);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("$3.49"), Some(3.49));
        assert_eq!(parse_price(" $1,299.00 "), Some(1299.0));
        assert_eq!(parse_price("4"), Some(4.0));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("N/A"), None);
        assert_eq!(parse_price("free"), None);
    }

    #[test]
    fn test_ranking_order_and_price_tiebreak() {
        let products = vec![
            CandidateProduct::new("b", "Tomato Soup").with_price("$1.00"),
            CandidateProduct::new("c", "Tomato Paste 6 oz"),
            CandidateProduct::new("a", "Tomato Paste 6 oz").with_price("$2.50"),
            CandidateProduct::new("d", "Tomato Paste 6 oz").with_price("$0.99"),
        ];

        let ranked = rank_products_by_confidence("tomato paste", products);
        let ids: Vec<&str> = ranked.iter().map(|p| p.asin.as_str()).collect();
        assert_eq!(ids, vec!["d", "a", "c", "b"]);
        assert_eq!(ranked.products[0].price_float, Some(0.99));

        for pair in ranked.products.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn test_rank_empty() {
        let ranked = rank_products_by_confidence("basil", Vec::new());
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(92.0), "✓   92%");
        assert_eq!(format_confidence(65.0), "~   65%");
        assert_eq!(format_confidence(12.4), "?   12%");
    }
}
