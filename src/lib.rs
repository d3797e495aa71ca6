//! # Recipe Cart
//!
//! Turns recipe ingredient lines into shopping searches: parses quantities,
//! cleans product names, builds catalog queries, sizes purchases against
//! standard packages, and ranks candidate products by confidence.
//!
//! The text pipeline is pure and infallible. The orchestration layer in
//! [`service`] drives it against external recipe sources and product search
//! sessions.

pub mod canonical_tables;
pub mod circuit_breaker;
pub mod config;
pub mod conversions;
pub mod error;
pub mod fuzz;
pub mod ingredient_model;
pub mod matcher;
pub mod measurement_patterns;
pub mod name_cleaner;
pub mod pipeline;
pub mod quantity_parser;
pub mod recipe_source;
pub mod search_query;
pub mod service;
pub mod session;
