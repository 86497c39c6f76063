use std::path::PathBuf;
use std::sync::Arc;

use agentic_search::core::config::DirectoryBackend;
use agentic_search::{RetrievalCache, SearchConfig, SearchPipeline};
use clap::Parser;
use serde_json::json;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(version, about = "Search for places matching a free-text query", rename_all = "kebab")]
struct Args {
    /// Free-text query, e.g. `find a doctor`.
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,

    /// Where the user is: free text or "lat,lng".
    #[arg(long, short = 'l')]
    location: Option<String>,

    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Use the offline directory instead of Google.
    #[arg(long)]
    stub: bool,

    #[arg(long)]
    max_relax: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("agentic_search=info".parse()?))
        .init();

    let args = Args::parse();

    let mut config = match args.config.as_deref() {
        Some(path) => SearchConfig::load(Some(path))?,
        None => SearchConfig::from_env()?,
    };
    if args.stub {
        config.directory_backend = DirectoryBackend::Stub;
    }
    if let Some(max_relax) = args.max_relax {
        config.max_relax = max_relax;
    }

    let cache = Arc::new(RetrievalCache::from_capacity(config.cache_capacity));
    let pipeline = SearchPipeline::from_config(&config, cache)?;

    let query = args.query.join(" ");
    let location = args.location.unwrap_or_else(|| config.default_user_location.clone());
    let state = pipeline.run(&query, &location).await;

    let output = json!({
        "run_id": state.run_id,
        "query": state.original_query,
        "domain": state.domain,
        "working_query": state.working_query,
        "relax_count": state.relax_count,
        "results": state.final_results,
        "trace": state.trace,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
