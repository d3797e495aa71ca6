//! # Shopping Error Types Module
//!
//! Errors raised by the orchestration layer around the external recipe
//! source and product search. The text pipeline itself never fails.

/// Errors from configuration, collaborators and the search recovery logic
#[derive(Debug, Clone, PartialEq)]
pub enum ShopError {
    /// Rejected request input (e.g. an empty ingredient line)
    Validation(String),
    /// Invalid configuration value
    Config(String),
    /// Recipe source could not be read
    Source(String),
    /// Shopper session could not be launched or was lost
    Session(String),
    /// Product search failure; transient failures are retried
    Search { message: String, transient: bool },
    /// Search refused while the circuit breaker is open
    CircuitOpen(String),
}

impl ShopError {
    /// A search failure worth retrying after a session restart
    pub fn transient(message: impl Into<String>) -> Self {
        ShopError::Search {
            message: message.into(),
            transient: true,
        }
    }

    /// A search failure that retrying will not fix
    pub fn permanent(message: impl Into<String>) -> Self {
        ShopError::Search {
            message: message.into(),
            transient: false,
        }
    }

    /// Whether the retry loop should try again
    pub fn is_retryable(&self) -> bool {
        match self {
            ShopError::Search { transient, .. } => *transient,
            ShopError::Session(_) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for ShopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShopError::Validation(msg) => write!(f, "Validation error: {msg}"),
            ShopError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ShopError::Source(msg) => write!(f, "Recipe source error: {msg}"),
            ShopError::Session(msg) => write!(f, "Session error: {msg}"),
            ShopError::Search { message, transient: true } => {
                write!(f, "Search error (transient): {message}")
            }
            ShopError::Search { message, .. } => write!(f, "Search error: {message}"),
            ShopError::CircuitOpen(msg) => write!(f, "Circuit open: {msg}"),
        }
    }
}

impl std::error::Error for ShopError {}

impl From<anyhow::Error> for ShopError {
    fn from(err: anyhow::Error) -> Self {
        ShopError::permanent(err.to_string())
    }
}

impl From<std::io::Error> for ShopError {
    fn from(err: std::io::Error) -> Self {
        ShopError::Source(err.to_string())
    }
}
