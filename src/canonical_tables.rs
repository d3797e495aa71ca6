//! # Canonical Tables Module
//!
//! Fixed lookup data shared by every pipeline stage: the unit vocabulary,
//! fraction glyphs, the word lists used to clean names and build queries,
//! ingredient aliases, package sizes and the product-matching penalty tables.
//!
//! All tables are built once on first use and never mutated afterwards.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Vulgar fraction glyphs and their numeric values
pub const UNICODE_FRACTIONS: &[(char, f64)] = &[
    ('¼', 0.25),
    ('½', 0.5),
    ('¾', 0.75),
    ('⅐', 1.0 / 7.0),
    ('⅑', 1.0 / 9.0),
    ('⅒', 0.1),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('⅕', 0.2),
    ('⅖', 0.4),
    ('⅗', 0.6),
    ('⅘', 0.8),
    ('⅙', 1.0 / 6.0),
    ('⅚', 5.0 / 6.0),
    ('⅛', 0.125),
    ('⅜', 0.375),
    ('⅝', 0.625),
    ('⅞', 0.875),
];

/// Every unit alias (lowercase) and its canonical singular form
const UNIT_ALIASES: &[(&str, &str)] = &[
    // Volume
    ("cup", "cup"),
    ("cups", "cup"),
    ("c", "cup"),
    ("tablespoon", "tablespoon"),
    ("tablespoons", "tablespoon"),
    ("tbsp", "tablespoon"),
    ("tbs", "tablespoon"),
    ("teaspoon", "teaspoon"),
    ("teaspoons", "teaspoon"),
    ("tsp", "teaspoon"),
    ("fluid ounce", "fl oz"),
    ("fluid ounces", "fl oz"),
    ("fl oz", "fl oz"),
    ("fl. oz", "fl oz"),
    ("pint", "pint"),
    ("pints", "pint"),
    ("pt", "pint"),
    ("quart", "quart"),
    ("quarts", "quart"),
    ("qt", "quart"),
    ("gallon", "gallon"),
    ("gallons", "gallon"),
    ("gal", "gallon"),
    ("milliliter", "ml"),
    ("milliliters", "ml"),
    ("ml", "ml"),
    ("liter", "liter"),
    ("liters", "liter"),
    ("l", "liter"),
    // Weight
    ("pound", "lb"),
    ("pounds", "lb"),
    ("lb", "lb"),
    ("lbs", "lb"),
    ("ounce", "oz"),
    ("ounces", "oz"),
    ("oz", "oz"),
    ("gram", "g"),
    ("grams", "g"),
    ("g", "g"),
    ("kilogram", "kg"),
    ("kilograms", "kg"),
    ("kg", "kg"),
    // Count
    ("piece", "piece"),
    ("pieces", "piece"),
    ("clove", "clove"),
    ("cloves", "clove"),
    ("can", "can"),
    ("cans", "can"),
    ("jar", "jar"),
    ("jars", "jar"),
    ("package", "package"),
    ("packages", "package"),
    ("pkg", "package"),
    ("bag", "bag"),
    ("bags", "bag"),
    ("box", "box"),
    ("boxes", "box"),
    ("bunch", "bunch"),
    ("bunches", "bunch"),
    ("head", "head"),
    ("heads", "head"),
    ("stalk", "stalk"),
    ("stalks", "stalk"),
    ("stick", "stick"),
    ("sticks", "stick"),
];

/// Leading preparation adjectives stripped by the name cleaner
pub const PREP_WORDS: &[&str] = &[
    "chopped", "minced", "sliced", "diced", "crushed", "ground", "grated", "shredded", "cubed",
    "peeled", "cored", "seeded", "julienned", "halved", "quartered", "beaten", "sifted", "melted",
    "softened", "finely", "coarsely", "roughly", "leaves", "leaf", "stems",
];

/// Qualifier phrases that end an ingredient line when introduced by a comma
pub const TRAILING_QUALIFIERS: &[&str] = &["divided", "or to taste", "plus more", "to taste", "optional"];

/// Descriptor nouns dropped when they are the final word of a name
pub const SUFFIX_WORDS: &[&str] = &["leaves", "leaf", "stems", "florets", "spears", "wedges", "ribs"];

/// Product-form words worth keeping in a search query
pub const PRODUCT_FORMS: &[&str] = &[
    "crushed", "diced", "whole", "sliced", "chopped", "ground", "shredded", "dried", "frozen",
    "stewed", "puree", "paste",
];

/// Staple products whose form word changes what is bought ("crushed tomatoes")
pub const FORM_STAPLES: &[&str] = &[
    "tomatoes", "beef", "pork", "turkey", "chicken", "cheese", "spinach", "corn", "peas", "beans",
];

/// Words marking an ingredient as sold in a package
pub const PACKAGED_MARKERS: &[&str] = &["can", "cans", "jar", "jars", "frozen"];

/// Container keywords and their singular form, in match priority order
pub const CONTAINER_KEYWORDS: &[(&str, &str)] = &[
    ("can", "can"),
    ("cans", "can"),
    ("jar", "jar"),
    ("jars", "jar"),
    ("box", "box"),
    ("boxes", "box"),
    ("package", "package"),
    ("packages", "package"),
];

/// Raw produce and herbs that default to the fresh section
pub const FRESH_PRODUCE: &[&str] = &[
    // Herbs
    "parsley", "cilantro", "basil", "mint", "dill", "rosemary", "thyme",
    // Greens
    "spinach", "kale", "lettuce", "arugula",
    // Vegetables
    "carrot", "celery", "onion", "garlic", "potato", "tomato", "pepper",
    // Fruits
    "apple", "banana", "orange", "lemon", "lime",
];

/// Words showing an ingredient is already processed or packaged
pub const PROCESSED_MARKERS: &[&str] = &[
    "dried", "frozen", "canned", "jar", "jars", "can", "cans", "paste", "sauce", "powder", "ground",
];

/// Ingredient keywords mapped to title words that signal a different product
pub const NEGATIVE_KEYWORDS: &[(&str, &[&str])] = &[
    ("sausage", &["sauce", "pizza", "soup", "seasoning", "ravioli", "lasagna"]),
    ("chicken", &["soup", "broth", "stock", "seasoning", "noodle", "bouillon"]),
    ("beef", &["broth", "stock", "jerky", "seasoning", "bouillon"]),
    ("cheese", &["macaroni", "cracker", "snack", "sauce"]),
    ("tomato", &["soup", "ketchup", "salsa"]),
    ("milk", &["chocolate", "cookie", "cracker"]),
    ("butter", &["cookie", "cracker", "popcorn"]),
    ("egg", &["noodle", "salad"]),
];

/// Processed-food words penalised for short raw-ingredient queries
pub const GENERAL_NEGATIVES: &[&str] = &["sauce", "seasoning", "mix", "blend", "soup", "dip"];

const ALIASES: &[(&str, &str)] = &[
    ("onions", "onion"),
    ("yellow onion", "onion"),
    ("white onion", "onion"),
    ("red onion", "onion"),
    ("sweet onion", "onion"),
    ("garlic cloves", "garlic"),
    ("garlic clove", "garlic"),
    ("ground beef", "ground_beef"),
    ("lean beef", "ground_beef"),
    ("lean ground beef", "ground_beef"),
    ("beef", "ground_beef"),
    ("tomato paste", "tomato_paste"),
    ("tomato sauce", "tomato_sauce"),
    ("crushed tomatoes", "tomatoes_crushed"),
    ("tomatoes", "tomatoes_crushed"),
    ("mozzarella cheese", "cheese"),
    ("parmesan cheese", "cheese"),
    ("ricotta cheese", "cheese"),
    ("cheddar cheese", "cheese"),
    ("egg", "eggs"),
    ("lasagna noodles", "pasta"),
    ("noodles", "pasta"),
    ("spaghetti", "pasta"),
    ("all-purpose flour", "flour"),
    ("white flour", "flour"),
    ("white sugar", "sugar"),
    ("granulated sugar", "sugar"),
];

// Ounces per recipe unit, for ingredients measured by volume or count
const VOLUME_TO_WEIGHT: &[(&str, &[(&str, f64)])] = &[
    ("onion", &[("cup", 5.6), ("medium", 8.0)]),
    ("garlic", &[("clove", 0.16), ("head", 2.4)]),
    ("tomato", &[("cup", 6.4), ("medium", 6.4)]),
    ("cheese", &[("cup", 4.0)]),
    ("butter", &[("tablespoon", 0.5), ("stick", 4.0)]),
    ("flour", &[("cup", 4.5)]),
    ("sugar", &[("cup", 7.0)]),
];

// Retail package sizes in ounces, smallest first
const PACKAGE_SIZES: &[(&str, &[f64])] = &[
    ("onion", &[16.0, 32.0, 48.0, 80.0]),
    ("garlic", &[2.0, 4.0, 8.0]),
    ("ground_beef", &[16.0, 32.0, 48.0]),
    ("tomato_paste", &[6.0, 12.0, 16.0]),
    ("tomato_sauce", &[8.0, 15.0, 29.0]),
    ("tomatoes_crushed", &[14.0, 28.0]),
    ("cheese", &[8.0, 16.0, 32.0]),
    ("eggs", &[12.0, 18.0, 24.0]),
    ("pasta", &[12.0, 16.0, 32.0]),
    ("flour", &[32.0, 80.0]),
    ("sugar", &[32.0, 64.0]),
];

lazy_static! {
    /// Unit alias lookup, keyed by lowercase alias
    pub static ref UNIT_MAPPINGS: HashMap<&'static str, &'static str> =
        UNIT_ALIASES.iter().copied().collect();

    /// Unit aliases ordered longest first, so prefix grammars prefer "tablespoons" over "t..."
    pub static ref UNIT_ALIASES_BY_LENGTH: Vec<&'static str> = {
        let mut aliases: Vec<&'static str> = UNIT_ALIASES.iter().map(|(alias, _)| *alias).collect();
        aliases.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        aliases
    };

    /// Ingredient name normalisation for table lookups
    pub static ref INGREDIENT_ALIASES: HashMap<&'static str, &'static str> =
        ALIASES.iter().copied().collect();

    /// Ounces per unit keyed by canonical ingredient, then canonical unit
    pub static ref VOLUME_TO_WEIGHT_OZ: HashMap<&'static str, HashMap<&'static str, f64>> =
        VOLUME_TO_WEIGHT
            .iter()
            .map(|(ingredient, units)| (*ingredient, units.iter().copied().collect()))
            .collect();

    /// Standard package sizes in ounces keyed by canonical ingredient
    pub static ref STANDARD_PACKAGE_SIZES: HashMap<&'static str, &'static [f64]> =
        PACKAGE_SIZES.iter().copied().collect();
}

/// Resolve a unit alias (any case, optional trailing period) to its canonical form
pub fn canonical_unit(word: &str) -> Option<&'static str> {
    let key = word.trim().trim_end_matches('.').to_lowercase();
    UNIT_MAPPINGS.get(key.as_str()).copied()
}

/// Numeric value of a single fraction glyph
pub fn fraction_value(glyph: char) -> Option<f64> {
    UNICODE_FRACTIONS
        .iter()
        .find(|(g, _)| *g == glyph)
        .map(|(_, value)| *value)
}

/// All fraction glyphs concatenated, for use inside regex character classes
pub fn fraction_glyphs() -> String {
    UNICODE_FRACTIONS.iter().map(|(g, _)| *g).collect()
}

/// Normalise an ingredient name to the key used by the sizing tables
pub fn normalize_ingredient(name: &str) -> String {
    let name = name.trim().to_lowercase();
    match INGREDIENT_ALIASES.get(name.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => name,
    }
}
