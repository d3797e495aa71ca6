//! # Unit Conversion and Purchase Sizing
//!
//! Converts a parsed recipe quantity into an amount to buy, expressed in
//! ounces or pounds, and compares that amount against retail package sizes.
//!
//! ## Features
//!
//! - Direct conversion of weight and liquid volume units to ounces
//! - Ingredient-specific weights for units with no fixed factor ("3 cloves garlic")
//! - ±20% purchase ranges with up to three standard package suggestions
//! - Size classification of a product against the needed range
//! - Purchase quantity recommendation under two policies
//!
//! ## Usage
//!
//! ```rust
//! use recipe_cart::conversions::convert_recipe_to_purchase;
//! use recipe_cart::quantity_parser::parse_quantity;
//!
//! let qty = parse_quantity("2 (6 ounce) cans tomato paste");
//! let info = convert_recipe_to_purchase(&qty, "tomato paste");
//! assert_eq!(info.note.as_deref(), Some("Need 10-14 oz"));
//! assert_eq!(info.recommendations, vec![12.0, 16.0]);
//! ```

use crate::canonical_tables::{
    canonical_unit, normalize_ingredient, STANDARD_PACKAGE_SIZES, VOLUME_TO_WEIGHT_OZ,
};
use crate::ingredient_model::{format_amount, DisplayUnit, ParsedQuantity, PurchaseInfo, SizeMatch};
use crate::measurement_patterns::PRODUCT_SIZE;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Margin applied on both sides of the needed amount
pub const PURCHASE_MARGIN: f64 = 0.2;

/// Needs at or above this many ounces are displayed in pounds
const POUND_DISPLAY_THRESHOLD_OZ: f64 = 16.0;

/// Maximum number of package sizes suggested
const MAX_RECOMMENDATIONS: usize = 3;

/// Convert an amount in a canonical unit to ounces
///
/// Volume units are treated as fluid ounces. Returns `None` for units that
/// have no fixed conversion (cloves, heads, cans, ...).
pub fn convert_to_ounces(amount: f64, unit: &str) -> Option<f64> {
    let factor = match unit {
        "oz" | "fl oz" => 1.0,
        "lb" => 16.0,
        "g" => 0.035274,
        "kg" => 35.274,
        "cup" => 8.0,
        "tablespoon" => 0.5,
        "teaspoon" => 0.1667,
        "pint" => 16.0,
        "quart" => 32.0,
        "gallon" => 128.0,
        "ml" => 0.033814,
        "liter" => 33.814,
        _ => return None,
    };
    Some(amount * factor)
}

/// Ounces of `amount` `unit` of a specific ingredient, from the volume/count weight table
fn ingredient_weight_oz(ingredient_key: &str, amount: f64, unit: &str) -> Option<f64> {
    VOLUME_TO_WEIGHT_OZ
        .get(ingredient_key)
        .and_then(|units| units.get(unit))
        .map(|oz_per_unit| amount * oz_per_unit)
}

/// Work out how much of an ingredient to buy
///
/// Fixed unit factors come first. Ingredient-specific weights only cover
/// units with no fixed factor, such as cloves of garlic or sticks of butter.
pub fn convert_recipe_to_purchase(quantity: &ParsedQuantity, ingredient_name: &str) -> PurchaseInfo {
    let ingredient_key = normalize_ingredient(ingredient_name);
    let mut info = PurchaseInfo {
        ingredient_key: ingredient_key.clone(),
        ..Default::default()
    };

    let (total, unit) = match (quantity.total_amount, quantity.total_unit.as_deref()) {
        (Some(total), Some(unit)) if total > 0.0 => (total, unit),
        _ => {
            info.note = Some("Could not determine quantity".to_string());
            return info;
        }
    };

    let needed_oz = convert_to_ounces(total, unit)
        .or_else(|| ingredient_weight_oz(&ingredient_key, total, unit));

    let Some(needed_oz) = needed_oz else {
        debug!("No ounce conversion for {} {} of '{}'", total, unit, ingredient_key);
        info.note = Some(format!("Need {} {}", format_amount(total), unit));
        return info;
    };

    let low = needed_oz * (1.0 - PURCHASE_MARGIN);
    let high = needed_oz * (1.0 + PURCHASE_MARGIN);

    if let Some(sizes) = STANDARD_PACKAGE_SIZES.get(ingredient_key.as_str()) {
        info.recommendations = sizes
            .iter()
            .copied()
            .filter(|size| *size >= low)
            .take(MAX_RECOMMENDATIONS)
            .collect();
    }

    if needed_oz >= POUND_DISPLAY_THRESHOLD_OZ {
        info.unit = DisplayUnit::Lb;
        info.needed = Some(needed_oz / 16.0);
        info.needed_range = Some((low / 16.0, high / 16.0));
        info.note = Some(format!("Need {:.1}-{:.1} lbs", low / 16.0, high / 16.0));
    } else {
        info.unit = DisplayUnit::Oz;
        info.needed = Some(needed_oz);
        info.needed_range = Some((low, high));
        info.note = Some(format!("Need {:.0}-{:.0} oz", low, high));
    }

    trace!("Purchase info for '{}': {:?}", ingredient_name, info);
    info
}

/// Classify a product's package size against the needed range, both in ounces
pub fn classify_size(product_oz: f64, needed_range_oz: (f64, f64)) -> Option<SizeMatch> {
    if product_oz <= 0.0 || !product_oz.is_finite() {
        return None;
    }

    let (low, high) = needed_range_oz;
    let size_match = if product_oz >= low && product_oz <= high {
        SizeMatch::PerfectFit
    } else if product_oz < low {
        SizeMatch::NeedMultiple {
            count: (low / product_oz).ceil() as u32,
        }
    } else if product_oz <= high * 1.3 {
        SizeMatch::SlightlyLarger
    } else if product_oz <= high * 1.5 {
        SizeMatch::LargerThanNeeded
    } else {
        SizeMatch::MuchLarger
    };

    Some(size_match)
}

/// Package size printed in a product title, in ounces
///
/// ```rust
/// use recipe_cart::conversions::product_size_oz;
///
/// assert_eq!(product_size_oz("Ground Beef, 1 lb"), Some(16.0));
/// assert_eq!(product_size_oz("Fresh Basil"), None);
/// ```
pub fn product_size_oz(title: &str) -> Option<f64> {
    let caps = PRODUCT_SIZE.captures(title)?;
    let value: f64 = caps[1].parse().ok()?;
    let unit_text = caps[2].replace('.', " ");
    let unit_text = unit_text.split_whitespace().collect::<Vec<&str>>().join(" ");
    let unit = canonical_unit(&unit_text)?;
    convert_to_ounces(value, unit).filter(|oz| *oz > 0.0)
}

/// How many units of a product to recommend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityPolicy {
    /// Cover the low end of the needed range
    #[default]
    NeededRange,
    /// One unit unless the recipe clearly needs several packages
    Conservative,
}

impl FromStr for QuantityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "needed_range" | "range" => Ok(QuantityPolicy::NeededRange),
            "conservative" => Ok(QuantityPolicy::Conservative),
            other => Err(format!("unknown quantity policy '{}'", other)),
        }
    }
}

impl fmt::Display for QuantityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityPolicy::NeededRange => write!(f, "needed_range"),
            QuantityPolicy::Conservative => write!(f, "conservative"),
        }
    }
}

/// Recommend how many units of the titled product to buy; always at least 1
pub fn recommend_quantity(
    policy: QuantityPolicy,
    purchase: &PurchaseInfo,
    quantity: &ParsedQuantity,
    product_title: &str,
) -> u32 {
    let recommended = match policy {
        QuantityPolicy::NeededRange => needed_range_quantity(purchase, product_title),
        QuantityPolicy::Conservative => conservative_quantity(quantity, product_title),
    };
    recommended.max(1)
}

fn needed_range_quantity(purchase: &PurchaseInfo, product_title: &str) -> u32 {
    let (Some(range), Some(product_oz)) = (purchase.range_in_ounces(), product_size_oz(product_title)) else {
        return 1;
    };
    match classify_size(product_oz, range) {
        Some(SizeMatch::NeedMultiple { count }) => count,
        _ => 1,
    }
}

/// Buy per container rather than per total need
///
/// The size of one container is compared with the product. A product close to
/// that size is bought once per container. Otherwise the total need decides, so
/// "2 (6 oz) cans" buys one 12 oz product, not two.
fn conservative_quantity(quantity: &ParsedQuantity, product_title: &str) -> u32 {
    let (Some(amount), Some(unit)) = (quantity.amount, quantity.unit.as_deref()) else {
        return 1;
    };

    // Spoon and cup measures come out of a single container
    if matches!(unit, "teaspoon" | "tablespoon" | "cup" | "ml") {
        return 1;
    }

    let containers = quantity
        .count
        .filter(|count| *count > 0.0)
        .map(|count| count.round().max(1.0) as u32);

    let Some(product_oz) = product_size_oz(product_title) else {
        return containers.unwrap_or(1);
    };

    let needed_oz = match unit {
        "oz" | "lb" | "g" | "kg" => convert_to_ounces(amount, unit),
        _ => None,
    };
    let Some(needed_oz) = needed_oz else {
        return 1;
    };

    match (containers, quantity.count) {
        (Some(containers), Some(count)) => {
            let per_container = needed_oz / product_oz;
            if (0.8..=1.2).contains(&per_container) {
                return containers;
            }
            (needed_oz * count / product_oz).ceil() as u32
        }
        _ => {
            let ratio = needed_oz / product_oz;
            if ratio > 1.2 {
                ratio.ceil() as u32
            } else {
                1
            }
        }
    }
}
