//! Recipe ingredient sources

use crate::error::ShopError;
use tracing::debug;

/// Yields the raw ingredient lines of a recipe
///
/// An empty list means the recipe has no ingredients; it is not an error.
#[allow(async_fn_in_trait)]
pub trait RecipeSource {
    async fn ingredients(&self, reference: &str) -> Result<Vec<String>, ShopError>;
}

/// Reads one ingredient per line from a local text file
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRecipeSource;

impl TextRecipeSource {
    /// Split text into trimmed, non-blank ingredient lines
    pub fn parse_lines(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl RecipeSource for TextRecipeSource {
    async fn ingredients(&self, reference: &str) -> Result<Vec<String>, ShopError> {
        let text = tokio::fs::read_to_string(reference)
            .await
            .map_err(|e| ShopError::Source(format!("{reference}: {e}")))?;

        let lines = Self::parse_lines(&text);
        debug!(reference, count = lines.len(), "Read ingredient lines");
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_lines() {
        let lines = TextRecipeSource::parse_lines("  2 cups flour \n\n\t\n3 eggs\r\n");
        assert_eq!(lines, vec!["2 cups flour", "3 eggs"]);
    }

    #[tokio::test]
    async fn test_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "3 cloves garlic").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "1 pound ground beef").unwrap();

        let path = file.path().to_string_lossy().to_string();
        let lines = TextRecipeSource.ingredients(&path).await.unwrap();
        assert_eq!(lines, vec!["3 cloves garlic", "1 pound ground beef"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_source_error() {
        let result = TextRecipeSource
            .ingredients("/definitely/not/here/recipe.txt")
            .await;
        assert!(matches!(result, Err(ShopError::Source(_))));
    }
}
