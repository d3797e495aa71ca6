//! # Search Query Builder
//!
//! Turns a raw ingredient line into the string sent to a storefront search.
//! The cleaned name loses context that matters when shopping, so some of it
//! is put back: the product form ("crushed tomatoes"), the pack size of
//! packaged items ("6 oz can tomato paste") and container words.
//!
//! ```rust
//! use recipe_cart::search_query::{build_search_query, QueryOptions};
//!
//! let options = QueryOptions::default();
//! assert_eq!(build_search_query("2 (6 ounce) cans tomato paste", &options), "6 oz can tomato paste");
//! assert_eq!(build_search_query("1 pound ground beef", &options), "ground beef");
//! ```

use crate::canonical_tables::{
    CONTAINER_KEYWORDS, FORM_STAPLES, FRESH_PRODUCE, PACKAGED_MARKERS, PROCESSED_MARKERS,
    PRODUCT_FORMS,
};
use crate::ingredient_model::format_amount;
use crate::name_cleaner::clean_ingredient_name;
use crate::quantity_parser::parse_quantity;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Query building options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Prefix "fresh" to raw produce and herbs that are not marked processed
    pub fresh_produce: bool,
}

impl QueryOptions {
    pub fn with_fresh_produce(mut self, enabled: bool) -> Self {
        self.fresh_produce = enabled;
        self
    }
}

/// Lowercase words of a line, stripped of surrounding punctuation
fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

fn contains_word(words: &[String], word: &str) -> bool {
    words.iter().any(|w| w == word)
}

/// Build the storefront search string for an ingredient line
pub fn build_search_query(text: &str, options: &QueryOptions) -> String {
    let quantity = parse_quantity(text);
    let mut name = clean_ingredient_name(text);

    let raw_words = words(text);
    let is_packaged = PACKAGED_MARKERS
        .iter()
        .any(|marker| contains_word(&raw_words, marker));

    for form in PRODUCT_FORMS {
        if !contains_word(&raw_words, form) {
            continue;
        }
        let name_words = words(&name);
        if contains_word(&name_words, form) {
            continue;
        }
        let is_staple = FORM_STAPLES
            .iter()
            .any(|staple| contains_word(&name_words, staple));
        if is_packaged || is_staple {
            trace!("Restoring form '{}' for '{}'", form, name);
            name = format!("{} {}", form, name);
        }
    }

    if let (true, Some(amount), Some(unit), Some(container)) = (
        quantity.is_packaged(),
        quantity.amount,
        quantity.unit.as_deref(),
        quantity.container.as_deref(),
    ) {
        let query = format!("{} {} {} {}", format_amount(amount), unit, container, name);
        debug!("Packaged query for '{}': '{}'", text, query);
        return query.trim().to_string();
    }

    if let Some((_, singular)) = CONTAINER_KEYWORDS
        .iter()
        .find(|(keyword, _)| contains_word(&raw_words, keyword))
    {
        if !contains_word(&words(&name), singular) {
            name = format!("{} {}", singular, name);
        }
    }

    if options.fresh_produce {
        name = prefer_fresh(text, name);
    }

    let query = name.trim().to_string();
    debug!("Search query for '{}': '{}'", text, query);
    query
}

fn prefer_fresh(text: &str, name: String) -> String {
    let raw_words = words(text);
    let is_processed = PROCESSED_MARKERS
        .iter()
        .any(|marker| contains_word(&raw_words, marker));
    if is_processed {
        return name;
    }

    let name_words = words(&name);
    if contains_word(&name_words, "fresh") {
        return name;
    }

    let is_produce = FRESH_PRODUCE.iter().any(|item| {
        contains_word(&name_words, item) || contains_word(&name_words, &format!("{}s", item))
    });
    if is_produce {
        format!("fresh {}", name)
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(text: &str) -> String {
        build_search_query(text, &QueryOptions::default())
    }

    fn fresh_query(text: &str) -> String {
        build_search_query(text, &QueryOptions::default().with_fresh_produce(true))
    }

    #[test]
    fn test_packaged_items_use_pack_size() {
        assert_eq!(query("2 (6 ounce) cans tomato paste"), "6 oz can tomato paste");
        assert_eq!(
            query("1 (28 ounce) can crushed tomatoes"),
            "28 oz can crushed tomatoes"
        );
        assert_eq!(
            query("2 (6.5 ounce) cans canned tomato sauce"),
            "6.5 oz can canned tomato sauce"
        );
    }

    #[test]
    fn test_form_word_kept_for_staples() {
        assert_eq!(query("1 pound ground beef"), "ground beef");
        assert_eq!(query("¾ pound lean ground beef"), "lean ground beef");
        assert_eq!(
            query("2 cups shredded mozzarella cheese"),
            "shredded mozzarella cheese"
        );
    }

    #[test]
    fn test_form_word_dropped_for_cooking_instructions() {
        assert_eq!(query("2 cups minced onion"), "onion");
        assert_eq!(query("1 cup chopped celery"), "celery");
    }

    #[test]
    fn test_container_keyword_without_pack_size() {
        assert_eq!(query("1 can crushed tomatoes"), "can crushed tomatoes");
        assert_eq!(query("1 jar marinara"), "jar marinara");
    }

    #[test]
    fn test_unparsed_quantity_passes_name_through() {
        assert_eq!(query("12 lasagna noodles"), "lasagna noodles");
        assert_eq!(query("16 ounces ricotta cheese"), "ricotta cheese");
    }

    #[test]
    fn test_decimal_range_is_stripped() {
        assert_eq!(query("1.5-2 cups sugar"), "sugar");
    }

    #[test]
    fn test_fresh_mode() {
        assert_eq!(fresh_query("2 cups minced onion"), "fresh onion");
        assert_eq!(fresh_query("3 cloves garlic"), "fresh garlic");
        assert_eq!(fresh_query("2 carrots"), "fresh carrots");
        // Already fresh
        assert_eq!(fresh_query("½ cup fresh cilantro leaves"), "fresh cilantro");
        // Processed
        assert_eq!(fresh_query("1 teaspoon dried basil"), "dried basil");
        assert_eq!(fresh_query("1 tablespoon garlic powder"), "garlic powder");
        // Not produce
        assert_eq!(fresh_query("1 cup rice"), "rice");
    }

    #[test]
    fn test_fresh_mode_off_by_default() {
        assert_eq!(query("3 cloves garlic"), "garlic");
    }

    #[test]
    fn test_query_is_deterministic() {
        let text = "1 (28 ounce) can crushed tomatoes";
        assert_eq!(query(text), query(text));
    }
}
