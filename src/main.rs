use anyhow::{bail, Context, Result};
use recipe_cart::config::{AppConfig, LogFormat};
use recipe_cart::pipeline::plan_recipe;
use recipe_cart::recipe_source::{RecipeSource, TextRecipeSource};
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

async fn read_lines(reference: &str) -> Result<Vec<String>> {
    if reference == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read ingredients from stdin")?;
        return Ok(TextRecipeSource::parse_lines(&text));
    }

    Ok(TextRecipeSource.ingredients(reference).await?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(config.log_format);

    let Some(reference) = std::env::args().nth(1) else {
        bail!("usage: recipe-cart <ingredients.txt | ->");
    };

    info!(reference = %reference, "Planning recipe");
    let lines = read_lines(&reference).await?;
    let plan = plan_recipe(&reference, lines, &config.query);
    info!(ingredients = plan.ingredients.len(), "Recipe analysed");

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
