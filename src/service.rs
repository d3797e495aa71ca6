//! # Shopping Service
//!
//! Orchestrates the text pipeline around the external collaborators: a
//! recipe source and a product search session.
//!
//! ## Search flow
//!
//! 1. Reject empty ingredient text
//! 2. Analyse the line (quantity, name, query, purchase sizing)
//! 3. Search the requested storefront through the session pool, retrying
//!    transient failures after a session restart with exponential backoff
//! 4. When nothing is found, try the configured fallback storefronts in order
//! 5. Rank the results and keep the top N as shopping options
//!
//! A search that finds nothing anywhere is an empty outcome, not an error.

use crate::circuit_breaker::CircuitBreaker;
use crate::config::{AppConfig, RecoveryConfig};
use crate::error::ShopError;
use crate::ingredient_model::{CandidateProduct, ShoppingOption};
use crate::matcher::rank_products_by_confidence;
use crate::pipeline::{analyze_ingredient, plan_recipe, shopping_options, IngredientAnalysis, RecipePlan};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

pub use crate::recipe_source::{RecipeSource, TextRecipeSource};
pub use crate::session::{ProductSearch, SessionFactory, SessionPool};

/// Result of searching products for one ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub analysis: IngredientAnalysis,
    /// Storefront the options came from; `None` when nothing was found
    pub storefront: Option<String>,
    pub options: Vec<ShoppingOption>,
}

impl SearchOutcome {
    pub fn query(&self) -> &str {
        &self.analysis.search_query
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Calculate the delay before retry number `attempt` (1-based), in milliseconds
///
/// Doubles from the base delay up to the maximum, plus up to 10% random
/// jitter so that restarted sessions do not retry in lockstep.
pub fn calculate_retry_delay(attempt: u32, recovery: &RecoveryConfig) -> u64 {
    let exponent = attempt.saturating_sub(1).min(16);
    let delay = recovery
        .base_retry_delay_ms
        .saturating_mul(1u64 << exponent)
        .min(recovery.max_retry_delay_ms);

    let jitter = if delay >= 10 {
        rand::thread_rng().gen_range(0..=delay / 10)
    } else {
        0
    };
    delay + jitter
}

/// Ingredient search and recipe planning over a product search session
pub struct ShoppingService<F: SessionFactory> {
    config: AppConfig,
    sessions: SessionPool<F>,
    breaker: CircuitBreaker,
}

impl<F: SessionFactory> ShoppingService<F> {
    pub fn new(config: AppConfig, factory: F) -> Self {
        let breaker = CircuitBreaker::new(&config.recovery);
        Self {
            config,
            sessions: SessionPool::new(factory),
            breaker,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionPool<F> {
        &self.sessions
    }

    /// Find and rank products for one ingredient line
    ///
    /// `storefront` and `headless` fall back to the configured defaults.
    pub async fn search_ingredient(
        &self,
        text: &str,
        storefront: Option<&str>,
        headless: Option<bool>,
    ) -> Result<SearchOutcome, ShopError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ShopError::Validation("Ingredient text is required".to_string()));
        }

        let storefront = storefront.unwrap_or(self.config.default_storefront.as_str());
        let headless = headless.unwrap_or(self.config.headless);

        let analysis = analyze_ingredient(text, &self.config.query);
        let query = analysis.search_query.clone();
        info!(ingredient = %text, query = %query, storefront, "Searching for ingredient");

        let mut found_in = None;
        let mut products = self.search_with_retry(&query, storefront, headless).await?;
        if !products.is_empty() {
            found_in = Some(storefront.to_string());
        } else {
            for fallback in self.config.fallbacks_after(storefront) {
                info!(query = %query, storefront = %fallback, "No results, trying fallback storefront");
                products = self.search_with_retry(&query, &fallback, headless).await?;
                if !products.is_empty() {
                    found_in = Some(fallback);
                    break;
                }
            }
        }

        if products.is_empty() {
            warn!(query = %query, "No products found in any storefront");
            return Ok(SearchOutcome {
                analysis,
                storefront: None,
                options: Vec::new(),
            });
        }

        let ranked = rank_products_by_confidence(&query, products);
        let options = shopping_options(&analysis, &ranked, self.config.top_n, self.config.quantity_policy);
        info!(query = %query, results = ranked.len(), options = options.len(), "Ranked search results");

        Ok(SearchOutcome {
            analysis,
            storefront: found_in,
            options,
        })
    }

    /// Read a recipe from `source` and analyse every ingredient line
    pub async fn plan<S: RecipeSource>(&self, source: &S, reference: &str) -> Result<RecipePlan, ShopError> {
        let lines = source.ingredients(reference).await?;
        if lines.is_empty() {
            info!(reference, "Recipe has no ingredients");
        }
        Ok(plan_recipe(reference, lines, &self.config.query))
    }

    /// Close the shopper session
    pub async fn shutdown(&self) {
        self.sessions.close().await;
    }

    async fn search_once(
        &self,
        query: &str,
        storefront: &str,
        headless: bool,
    ) -> Result<Vec<CandidateProduct>, ShopError> {
        let mut session = self.sessions.acquire(headless).await?;
        session.search(query, storefront).await
    }

    async fn search_with_retry(
        &self,
        query: &str,
        storefront: &str,
        headless: bool,
    ) -> Result<Vec<CandidateProduct>, ShopError> {
        if self.breaker.is_open() {
            return Err(ShopError::CircuitOpen(format!(
                "product search disabled after {} consecutive failures",
                self.breaker.failure_count()
            )));
        }

        let max_attempts = self.config.recovery.max_retries + 1;
        let mut attempt = 1;
        loop {
            match self.search_once(query, storefront, headless).await {
                Ok(products) => {
                    self.breaker.record_success();
                    debug!(query, storefront, attempt, results = products.len(), "Search succeeded");
                    return Ok(products);
                }
                Err(e) => {
                    self.breaker.record_failure();
                    if !e.is_retryable() || attempt >= max_attempts {
                        warn!(query, storefront, attempt, error = %e, "Search failed");
                        return Err(e);
                    }

                    let delay = calculate_retry_delay(attempt, &self.config.recovery);
                    warn!(query, storefront, attempt, delay_ms = delay, error = %e, "Search failed, restarting session and retrying");
                    self.sessions.close().await;
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    attempt += 1;
                }
            }
        }
    }
}
