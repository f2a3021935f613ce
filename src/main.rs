use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use levelforge::provider::{OpenAiClient, OpenAiConfig, constants::openai};
use levelforge::{AppState, PromptVariant, router};

#[derive(Parser, Debug)]
#[command(name = "levelforge")]
#[command(about = "HTTP relay turning level-design parameters into LLM-generated level blueprints", long_about = None)]
struct Args {
    /// Server host
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "3000", env = "PORT")]
    port: u16,

    /// Blueprint template variant: standard or with-layout
    #[arg(long, default_value = "standard", env = "BLUEPRINT_VARIANT")]
    variant: PromptVariant,

    /// Upstream generation model
    #[arg(long, default_value = openai::DEFAULT_MODEL, env = "UPSTREAM_MODEL")]
    model: String,

    /// Upstream sampling temperature
    #[arg(long, default_value_t = openai::DEFAULT_TEMPERATURE, env = "UPSTREAM_TEMPERATURE")]
    temperature: f32,

    /// Upstream max output tokens
    #[arg(long, default_value_t = openai::DEFAULT_MAX_TOKENS, env = "UPSTREAM_MAX_TOKENS")]
    max_tokens: u32,

    /// Upstream API base URL
    #[arg(long, default_value = openai::API_BASE, env = "UPSTREAM_BASE_URL")]
    upstream_base_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = openai::DEFAULT_TIMEOUT_SECS, env = "UPSTREAM_TIMEOUT_SECS")]
    upstream_timeout_secs: u64,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = OpenAiConfig {
        base_url: args.upstream_base_url,
        model: args.model,
        temperature: args.temperature,
        max_tokens: args.max_tokens,
        timeout: Duration::from_secs(args.upstream_timeout_secs),
    };
    let gateway = OpenAiClient::new(config)?;
    let state = AppState::new(Arc::new(gateway), args.variant);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    tracing::info!(%addr, variant = %args.variant, "levelforge listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
    tracing::info!("shutdown signal received");
}
