//! # Ingredient and Product Data Model
//!
//! This module defines the records passed between pipeline stages: the parsed
//! quantity of a recipe line, the purchase sizing derived from it, and the
//! candidate products returned by a storefront search.
//!
//! ## Core Concepts
//!
//! - **ParsedQuantity**: count, per-item amount, canonical unit and container
//! - **PurchaseInfo**: how much to buy, as a ±20% range and package suggestions
//! - **CandidateProduct**: an external search hit, scored in place by the ranker
//! - **ShoppingOption**: a ranked product annotated with a purchase quantity
//!
//! ## Usage
//!
//! ```rust
//! use recipe_cart::ingredient_model::ParsedQuantity;
//!
//! let qty = ParsedQuantity::packaged("2 (6 ounce) cans tomato paste", 2.0, 6.0, "oz", "can");
//! assert_eq!(qty.total_amount, Some(12.0));
//! assert_eq!(qty.total_unit.as_deref(), Some("oz"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured quantity read from one ingredient line
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedQuantity {
    /// Number of containers or items (e.g. 2 in "2 (6 ounce) cans")
    pub count: Option<f64>,

    /// Quantity per item (e.g. 6 in "2 (6 ounce) cans")
    pub amount: Option<f64>,

    /// Canonical unit drawn from the unit table
    pub unit: Option<String>,

    /// Normalised container type ("can", "jar", ...)
    pub container: Option<String>,

    /// count × amount, present only when both are known
    pub total_amount: Option<f64>,

    /// Unit of `total_amount`
    pub total_unit: Option<String>,

    /// The source text
    pub original: String,
}

impl ParsedQuantity {
    /// A line with no recognisable quantity
    pub fn unparsed(original: &str) -> Self {
        Self {
            original: original.to_string(),
            ..Default::default()
        }
    }

    /// A single measured amount such as "2 cups"; the count is 1
    pub fn measured(original: &str, amount: f64, unit: &str) -> Self {
        Self {
            count: Some(1.0),
            amount: Some(amount),
            unit: Some(unit.to_string()),
            container: None,
            total_amount: Some(amount),
            total_unit: Some(unit.to_string()),
            original: original.to_string(),
        }
    }

    /// Several containers of a fixed size such as "2 (6 ounce) cans"
    pub fn packaged(original: &str, count: f64, amount: f64, unit: &str, container: &str) -> Self {
        Self {
            count: Some(count),
            amount: Some(amount),
            unit: Some(unit.to_string()),
            container: Some(container.to_string()),
            total_amount: Some(count * amount),
            total_unit: Some(unit.to_string()),
            original: original.to_string(),
        }
    }

    /// Whether any quantity was recognised
    pub fn is_parsed(&self) -> bool {
        self.amount.is_some()
    }

    /// Whether the line names a container with a known size
    pub fn is_packaged(&self) -> bool {
        self.container.is_some() && self.amount.is_some() && self.unit.is_some()
    }
}

impl fmt::Display for ParsedQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.total_amount, self.total_unit.as_deref()) {
            (Some(total), Some(unit)) => {
                if let (Some(count), Some(container)) = (self.count, self.container.as_deref()) {
                    write!(f, "{} {} × ", format_amount(count), container)?;
                    if let Some(amount) = self.amount {
                        write!(f, "{} {} = ", format_amount(amount), unit)?;
                    }
                }
                write!(f, "{} {}", format_amount(total), unit)
            }
            _ => write!(f, "unknown quantity"),
        }
    }
}

/// Unit used to present a purchase need
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    #[default]
    Oz,
    Lb,
}

impl DisplayUnit {
    /// Convert a value expressed in this unit back to ounces
    pub fn to_ounces(self, value: f64) -> f64 {
        match self {
            DisplayUnit::Oz => value,
            DisplayUnit::Lb => value * 16.0,
        }
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayUnit::Oz => write!(f, "oz"),
            DisplayUnit::Lb => write!(f, "lb"),
        }
    }
}

/// Purchase sizing for one ingredient
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PurchaseInfo {
    /// Canonical ingredient key used for the table lookups
    pub ingredient_key: String,

    /// Amount needed, in `unit`
    pub needed: Option<f64>,

    /// (low, high) need with a ±20% margin, in `unit`
    pub needed_range: Option<(f64, f64)>,

    /// Display unit for `needed` and `needed_range`
    pub unit: DisplayUnit,

    /// Up to three standard package sizes in ounces, smallest first
    pub recommendations: Vec<f64>,

    /// Human-readable summary
    pub note: Option<String>,
}

impl PurchaseInfo {
    /// The needed range converted back to ounces
    pub fn range_in_ounces(&self) -> Option<(f64, f64)> {
        self.needed_range
            .map(|(low, high)| (self.unit.to_ounces(low), self.unit.to_ounces(high)))
    }
}

/// How a product's package size compares with the needed range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SizeMatch {
    /// Within the needed range
    PerfectFit,
    /// Smaller than needed; `count` units cover the low bound
    NeedMultiple { count: u32 },
    /// Up to 1.3× the high bound
    SlightlyLarger,
    /// Up to 1.5× the high bound
    LargerThanNeeded,
    /// More than 1.5× the high bound
    MuchLarger,
}

impl fmt::Display for SizeMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeMatch::PerfectFit => write!(f, "[Perfect size]"),
            SizeMatch::NeedMultiple { count } => write!(f, "[May need {count}]"),
            SizeMatch::SlightlyLarger => write!(f, "[Slightly larger]"),
            SizeMatch::LargerThanNeeded => write!(f, "[Larger than needed]"),
            SizeMatch::MuchLarger => write!(f, "[Much larger]"),
        }
    }
}

/// A product returned by a storefront search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProduct {
    pub title: String,

    /// Price as printed by the storefront (e.g. "$3.49"); untrusted
    pub price: Option<String>,

    /// Storefront product id
    #[serde(alias = "id")]
    pub asin: String,

    pub image: Option<String>,
    pub url: Option<String>,
    pub department: Option<String>,

    /// Match confidence, 0-100, set by the ranker
    #[serde(default)]
    pub confidence: f64,

    /// Parsed numeric price, set by the ranker when absent
    pub price_float: Option<f64>,
}

impl CandidateProduct {
    /// Create a candidate with just an id and a title
    pub fn new(asin: &str, title: &str) -> Self {
        Self {
            title: title.to_string(),
            price: None,
            asin: asin.to_string(),
            image: None,
            url: None,
            department: None,
            confidence: 0.0,
            price_float: None,
        }
    }

    /// Attach the printed price
    pub fn with_price(mut self, price: &str) -> Self {
        self.price = Some(price.to_string());
        self
    }

    /// Attach a product page URL
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Attach an image URL
    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    /// Attach the department label
    pub fn with_department(mut self, department: &str) -> Self {
        self.department = Some(department.to_string());
        self
    }
}

/// Candidates sorted by confidence (descending), then price (ascending)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankedResultSet {
    pub products: Vec<CandidateProduct>,
}

impl RankedResultSet {
    /// The best `n` candidates
    pub fn top(&self, n: usize) -> &[CandidateProduct] {
        &self.products[..n.min(self.products.len())]
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateProduct> {
        self.products.iter()
    }
}

/// A ranked candidate ready for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingOption {
    pub title: String,
    pub price: Option<String>,
    pub asin: String,
    pub url: String,
    pub confidence: f64,
    pub image: Option<String>,
    pub department: Option<String>,
    /// Package size parsed from the title, in ounces
    pub package_oz: Option<f64>,
    pub size_match: Option<SizeMatch>,
    pub quantity_recommendation: u32,
    /// Unit price × quantity, when the price parses
    pub total_price: Option<f64>,
}

/// Render a number without a trailing ".0" for whole values
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
