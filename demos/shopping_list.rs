//! # Shopping List Walkthrough
//!
//! Runs a handful of recipe lines through the ingredient pipeline, then ranks
//! a fixed set of catalog results for one of them.
//!
//! ```text
//! cargo run --example shopping_list
//! ```

use recipe_cart::conversions::QuantityPolicy;
use recipe_cart::ingredient_model::CandidateProduct;
use recipe_cart::matcher::{format_confidence, rank_products_by_confidence};
use recipe_cart::pipeline::{plan_recipe, shopping_options};
use recipe_cart::search_query::QueryOptions;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let recipe = r#"
2 (6 ounce) cans tomato paste
1 (28 ounce) can crushed tomatoes
1 pound sweet Italian sausage
2 cups minced onion
3 cloves garlic, minced
12 lasagna noodles
1/4 cup chopped fresh basil leaves
16 ounces ricotta cheese
"#;

    let options = QueryOptions::default().with_fresh_produce(true);
    let plan = plan_recipe("lasagna", recipe.lines(), &options);

    println!("🧾 Recipe lines analysed: {}\n", plan.ingredients.len());
    for analysis in &plan.ingredients {
        println!("• {}", analysis.original);
        println!("    quantity: {}", analysis.quantity);
        println!("    name:     {}", analysis.cleaned_name);
        println!("    query:    {}", analysis.search_query);
        if let Some(note) = &analysis.purchase.note {
            println!("    purchase: {}", note);
        }
        if !analysis.purchase.recommendations.is_empty() {
            println!("    packages: {:?} oz", analysis.purchase.recommendations);
        }
        println!();
    }

    let Some(paste) = plan.ingredients.first() else {
        return Ok(());
    };

    let candidates = vec![
        CandidateProduct::new("B000PASTE6", "Hunt's Tomato Paste, 6 oz Can").with_price("$1.19"),
        CandidateProduct::new("B000PASTE12", "Contadina Tomato Paste, 12 oz").with_price("$2.49"),
        CandidateProduct::new("B000SAUCE", "Tomato Sauce, 15 oz Can").with_price("$1.05"),
        CandidateProduct::new("B000SOUP", "Classic Tomato Soup 10.75 oz").with_price("$0.99"),
    ];

    println!("🔍 Ranking results for '{}'\n", paste.search_query);
    let ranked = rank_products_by_confidence(&paste.search_query, candidates);
    for option in shopping_options(paste, &ranked, 3, QuantityPolicy::NeededRange) {
        let fit = option
            .size_match
            .map(|m| m.to_string())
            .unwrap_or_default();
        println!(
            "{} {} {} × {}",
            format_confidence(option.confidence),
            option.title,
            fit,
            option.quantity_recommendation
        );
        if let Some(total) = option.total_price {
            println!("        total ${:.2}  {}", total, option.url);
        }
    }

    Ok(())
}
