use clap::Parser;

use europarl_pipeline::{
    config::PipelineConfig,
    logging::setup_logging,
    pipeline::{Pipeline, PIPELINE_NAME},
};

#[derive(Parser)]
#[command(name = "ask", about = "Ask the European Parliament open-data API a question")]
struct Args {
    /// Free-text question, e.g. "German MEPs born after 1980"
    #[arg(required = true)]
    query: Vec<String>,

    #[arg(long)]
    base_url: Option<String>,

    #[arg(long)]
    max_results: Option<usize>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();
    let args = Args::parse();

    let mut config = PipelineConfig::load_or_default().await?;
    if let Some(url) = args.base_url {
        config.api_base_url = url;
    }
    if let Some(max) = args.max_results {
        config.max_results = max;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    config.clamp();

    let pipeline = Pipeline::new(config)?;
    let query = args.query.join(" ");
    let reply = pipeline
        .pipe(&query, PIPELINE_NAME, &[], &serde_json::Value::Null)
        .await;

    println!("{}", reply);
    Ok(())
}
