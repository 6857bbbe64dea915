use anyhow::{Context, Result};
use recipe_synth::api_connection::{OpenRouterBackend, API_KEY_ENV_VAR};
use recipe_synth::cli::parse_args;
use recipe_synth::estimation::EstimationTables;
use recipe_synth::recipe_synthesizer::RecipeSynthesizer;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env file for API keys
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli_args = parse_args();

    let tables =
        Arc::new(EstimationTables::load().context("Failed to load estimation tables")?);
    let backend = Arc::new(
        OpenRouterBackend::from_env(API_KEY_ENV_VAR)
            .context("Failed to configure generation backend")?,
    );
    let synthesizer = RecipeSynthesizer::new(backend, tables);

    let recipes = synthesizer
        .synthesize(
            &cli_args.ingredients,
            cli_args.dietary_restrictions.as_deref(),
        )
        .await
        .context("No usable ingredient text supplied")?;

    println!("{}", serde_json::to_string_pretty(&recipes)?);
    Ok(())
}
