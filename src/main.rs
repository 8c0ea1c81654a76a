//! Claimcheck CLI entrypoint.
//!
//! Verifies the factual claims in a text: pass the text as an argument or
//! pipe it on stdin, get one JSON claim per sentence on stdout.

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;

use claimcheck::cache::{CacheConfig, SemanticCache};
use claimcheck::config::Config;
use claimcheck::embedding::{DEFAULT_EMBEDDING_DIM, OpenAiEmbedder};
use claimcheck::fetch::ContentFetcher;
use claimcheck::llm::OpenAiLlm;
use claimcheck::pipeline::{ClaimPipeline, JsonlResultsLog};
use claimcheck::search::{DuckDuckGoNews, FactCheckTools, GoogleCustomSearch};
use claimcheck::vectordb::QdrantClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let text = input_text().context("no input text: pass it as an argument or on stdin")?;

    let openai_api_key = Config::require(&config.openai_api_key, "CLAIMCHECK_OPENAI_API_KEY")?;
    let factcheck_api_key =
        Config::require(&config.factcheck_api_key, "CLAIMCHECK_FACTCHECK_API_KEY")?;
    let search_api_key = Config::require(&config.search_api_key, "CLAIMCHECK_SEARCH_API_KEY")?;
    let search_engine_id =
        Config::require(&config.search_engine_id, "CLAIMCHECK_SEARCH_ENGINE_ID")?;

    tracing::info!(
        qdrant_url = %config.qdrant_url,
        collection = %config.collection_name,
        llm_model = %config.llm_model,
        "claimcheck starting"
    );

    let llm = Arc::new(OpenAiLlm::new(
        &config.openai_base_url,
        &openai_api_key,
        &config.llm_model,
    ));
    let embedder = Arc::new(OpenAiEmbedder::new(
        &config.openai_base_url,
        &openai_api_key,
        &config.embedding_model,
        DEFAULT_EMBEDDING_DIM,
    ));

    let index = QdrantClient::new(&config.qdrant_url).await?;
    index.health_check().await?;
    let cache = SemanticCache::new(
        index,
        embedder,
        CacheConfig::default()
            .with_collection_name(config.collection_name.clone())
            .with_similarity_threshold(config.similarity_threshold)
            .with_l1_capacity(config.l1_capacity),
    );

    let http = reqwest::Client::new();
    let claim_api = Arc::new(FactCheckTools::new(http.clone(), factcheck_api_key));
    let web = Arc::new(GoogleCustomSearch::new(
        http.clone(),
        search_api_key,
        search_engine_id,
    ));
    let news = Arc::new(DuckDuckGoNews::new(http));
    let fetcher = ContentFetcher::new(config.max_fetch_attempts)?;
    let results_log = Arc::new(JsonlResultsLog::open(&config.results_log_path)?);

    let pipeline = ClaimPipeline::new(cache, claim_api, llm, web, news, fetcher, results_log)
        .with_max_concurrent_claims(config.max_concurrent_claims);
    pipeline.prepare().await?;

    let claims = pipeline.analyze(&text).await;
    println!("{}", serde_json::to_string_pretty(&claims)?);

    Ok(())
}

/// Reads the input text from the first CLI argument, or stdin when absent.
fn input_text() -> Option<String> {
    if let Some(arg) = std::env::args().nth(1) {
        let arg = arg.trim().to_string();
        return (!arg.is_empty()).then_some(arg);
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer).ok()?;
    let buffer = buffer.trim().to_string();
    (!buffer.is_empty()).then_some(buffer)
}
