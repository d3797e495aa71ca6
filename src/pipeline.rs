//! # Ingredient Pipeline
//!
//! Runs the text stages on recipe lines and turns ranked search results into
//! shopping options.
//!
//! ```rust
//! use recipe_cart::pipeline::analyze_ingredient;
//! use recipe_cart::search_query::QueryOptions;
//!
//! let analysis = analyze_ingredient("2 (6 ounce) cans tomato paste", &QueryOptions::default());
//! assert_eq!(analysis.cleaned_name, "tomato paste");
//! assert_eq!(analysis.search_query, "6 oz can tomato paste");
//! assert_eq!(analysis.quantity.total_amount, Some(12.0));
//! ```

use crate::conversions::{classify_size, convert_recipe_to_purchase, product_size_oz, recommend_quantity, QuantityPolicy};
use crate::ingredient_model::{ParsedQuantity, PurchaseInfo, RankedResultSet, ShoppingOption};
use crate::matcher::parse_price;
use crate::name_cleaner::clean_ingredient_name;
use crate::quantity_parser::parse_quantity;
use crate::search_query::{build_search_query, QueryOptions};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Product page used when a candidate carries no URL of its own
const PRODUCT_URL_BASE: &str = "https://www.amazon.com/dp/";

/// Everything the pipeline derives from one recipe line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientAnalysis {
    pub original: String,
    pub quantity: ParsedQuantity,
    pub cleaned_name: String,
    pub search_query: String,
    pub purchase: PurchaseInfo,
}

/// Analysis of every line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipePlan {
    /// Where the lines came from (file path, URL, "-")
    pub reference: String,
    pub created_at: DateTime<Utc>,
    pub ingredients: Vec<IngredientAnalysis>,
}

impl RecipePlan {
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

/// Quantity, name, query and purchase sizing for one ingredient line
pub fn analyze_ingredient(text: &str, options: &QueryOptions) -> IngredientAnalysis {
    let quantity = parse_quantity(text);
    let cleaned_name = clean_ingredient_name(text);
    let search_query = build_search_query(text, options);
    let purchase = convert_recipe_to_purchase(&quantity, &cleaned_name);

    debug!(
        "Analysed '{}': query='{}', quantity={}",
        text, search_query, quantity
    );

    IngredientAnalysis {
        original: text.to_string(),
        quantity,
        cleaned_name,
        search_query,
        purchase,
    }
}

/// Analyse every non-blank line; no lines gives an empty plan
pub fn plan_recipe<I, S>(reference: &str, lines: I, options: &QueryOptions) -> RecipePlan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ingredients: Vec<IngredientAnalysis> = lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref().trim();
            (!line.is_empty()).then(|| analyze_ingredient(line, options))
        })
        .collect();

    info!("Planned {} ingredients from {}", ingredients.len(), reference);

    RecipePlan {
        reference: reference.to_string(),
        created_at: Utc::now(),
        ingredients,
    }
}

/// Annotate the best `top_n` ranked products with size fit and purchase quantity
pub fn shopping_options(
    analysis: &IngredientAnalysis,
    ranked: &RankedResultSet,
    top_n: usize,
    policy: QuantityPolicy,
) -> Vec<ShoppingOption> {
    let needed_range = analysis.purchase.range_in_ounces();

    ranked
        .top(top_n)
        .iter()
        .map(|product| {
            let package_oz = product_size_oz(&product.title);
            let size_match = match (package_oz, needed_range) {
                (Some(size), Some(range)) => classify_size(size, range),
                _ => None,
            };
            let quantity = recommend_quantity(policy, &analysis.purchase, &analysis.quantity, &product.title);
            let unit_price = product
                .price_float
                .or_else(|| product.price.as_deref().and_then(parse_price));

            ShoppingOption {
                title: product.title.clone(),
                price: product.price.clone(),
                asin: product.asin.clone(),
                url: product
                    .url
                    .clone()
                    .unwrap_or_else(|| format!("{}{}", PRODUCT_URL_BASE, product.asin)),
                confidence: product.confidence,
                image: product.image.clone(),
                department: product.department.clone(),
                package_oz,
                size_match,
                quantity_recommendation: quantity,
                total_price: unit_price.map(|price| price * f64::from(quantity)),
            }
        })
        .collect()
}
