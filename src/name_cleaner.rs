//! # Name Cleaner
//!
//! Reduces a raw recipe line to the bare product name used for searching:
//! quantities, units, preparation adjectives and trailing qualifiers are
//! removed, in a fixed order.
//!
//! ```rust
//! use recipe_cart::name_cleaner::clean_ingredient_name;
//!
//! assert_eq!(clean_ingredient_name("2 cups minced onion"), "onion");
//! assert_eq!(clean_ingredient_name("4 tablespoons chopped fresh parsley, divided"), "fresh parsley");
//! ```

use crate::measurement_patterns::{
    COMPLEX_PREFIX, DESCRIPTOR_SUFFIX, LEADING_NUMBER, PARENTHETICAL, PREP_PREFIX,
    TRAILING_QUALIFIER, UNIT_PREFIX,
};
use log::{debug, trace};

/// Stacked preparation adjectives are stripped at most this many times
const MAX_PREP_ROUNDS: usize = 3;

/// Strip quantity, unit and preparation words from an ingredient line
///
/// Letter case of the remaining words is preserved. If cleaning removes
/// everything, the input is returned unchanged.
pub fn clean_ingredient_name(text: &str) -> String {
    let mut name = text.trim().to_string();

    // The leading packaged quantity goes first, parenthesis included, so the
    // container word after it is removed together with it
    name = COMPLEX_PREFIX.replace(&name, "").into_owned();
    name = PARENTHETICAL.replace_all(&name, " ").trim().to_string();

    name = LEADING_NUMBER.replace(&name, "").into_owned();
    name = UNIT_PREFIX.replace(&name, "").into_owned();

    for round in 0..MAX_PREP_ROUNDS {
        let stripped = PREP_PREFIX.replace(&name, "").into_owned();
        if stripped == name {
            break;
        }
        trace!("Prep round {}: '{}' -> '{}'", round + 1, name, stripped);
        name = stripped;
    }

    name = TRAILING_QUALIFIER.replace(&name, "").into_owned();
    name = DESCRIPTOR_SUFFIX.replace(&name, "").into_owned();

    let name = name.split_whitespace().collect::<Vec<&str>>().join(" ");
    if name.is_empty() {
        debug!("Cleaning removed everything from '{}', keeping input", text);
        return text.to_string();
    }

    trace!("Cleaned '{}' -> '{}'", text, name);
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measured_line() {
        assert_eq!(clean_ingredient_name("2 cups minced onion"), "onion");
        assert_eq!(clean_ingredient_name("3 cloves garlic"), "garlic");
        assert_eq!(clean_ingredient_name("1 pound ground beef"), "beef");
    }

    #[test]
    fn test_packaged_line() {
        assert_eq!(clean_ingredient_name("2 (6 ounce) cans tomato paste"), "tomato paste");
        assert_eq!(
            clean_ingredient_name("1 (28 ounce) can crushed tomatoes"),
            "tomatoes"
        );
    }

    #[test]
    fn test_parenthetical_aside() {
        assert_eq!(clean_ingredient_name("2 cups flour (all-purpose)"), "flour");
    }

    #[test]
    fn test_fractions_and_ranges() {
        assert_eq!(clean_ingredient_name("½ cup sugar"), "sugar");
        assert_eq!(clean_ingredient_name("1 1/2 teaspoons salt"), "salt");
        assert_eq!(clean_ingredient_name("2½ cups milk"), "milk");
        assert_eq!(clean_ingredient_name("1-2 tablespoons olive oil"), "olive oil");
        assert_eq!(clean_ingredient_name("1.5-2 cups sugar"), "sugar");
        assert_eq!(clean_ingredient_name("2 - 2.5 pounds chicken thighs"), "chicken thighs");
    }

    #[test]
    fn test_unit_followed_by_of() {
        assert_eq!(clean_ingredient_name("1 cup of rice"), "rice");
    }

    #[test]
    fn test_stacked_prep_words() {
        assert_eq!(clean_ingredient_name("1 cup finely chopped onion"), "onion");
        assert_eq!(clean_ingredient_name("2 cups peeled cored sliced apples"), "apples");
    }

    #[test]
    fn test_trailing_qualifiers() {
        assert_eq!(clean_ingredient_name("salt, to taste"), "salt");
        assert_eq!(clean_ingredient_name("1 cup parmesan cheese, divided"), "parmesan cheese");
        assert_eq!(
            clean_ingredient_name("2 tablespoons olive oil, plus more for drizzling"),
            "olive oil"
        );
    }

    #[test]
    fn test_descriptor_suffix() {
        assert_eq!(clean_ingredient_name("½ cup fresh cilantro leaves"), "fresh cilantro");
        assert_eq!(clean_ingredient_name("2 cups broccoli florets"), "broccoli");
    }

    #[test]
    fn test_count_only_line_keeps_name() {
        assert_eq!(clean_ingredient_name("12 lasagna noodles"), "lasagna noodles");
    }

    #[test]
    fn test_collapse_returns_input() {
        assert_eq!(clean_ingredient_name("2"), "2");
        assert_eq!(clean_ingredient_name("(optional)"), "(optional)");
        assert_eq!(clean_ingredient_name(""), "");
    }

    #[test]
    fn test_clean_name_is_stable() {
        for name in ["onion", "tomato paste", "lasagna noodles", "fresh parsley", "Olive Oil"] {
            assert_eq!(clean_ingredient_name(name), name);
            let once = clean_ingredient_name(name);
            assert_eq!(clean_ingredient_name(&once), once);
        }
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(clean_ingredient_name("2 Cups Minced Red Onion"), "Red Onion");
    }
}
