use clap::Parser;
use std::path::PathBuf;

use europarl_pipeline::{
    config::PipelineConfig,
    logging::setup_logging,
    pipeline::Pipeline,
    router,
    AppState,
};

#[derive(Parser)]
#[command(name = "europarl-pipeline", about = "Serve the European Parliament query pipeline over HTTP")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Config file (defaults to ~/.europarl-pipeline/config.json)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();
    let args = Args::parse();

    let config_path = args.config.unwrap_or_else(PipelineConfig::config_file);
    let config = PipelineConfig::load_from(&config_path).await?;
    tracing::info!(?config, path = %config_path.display(), "loaded valves");

    let pipeline = Pipeline::new(config)?;
    pipeline.on_startup().await;

    let app_state = AppState::new(pipeline, Some(config_path));
    let app = router(app_state.clone());

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    tracing::info!("Backend server running on http://{}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    app_state.current_pipeline().await.on_shutdown().await;

    Ok(())
}
