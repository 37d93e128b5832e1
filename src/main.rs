use clap::Parser;
use tracing_subscriber::EnvFilter;

use admin_gateway::config::AppConfig;

#[derive(Parser)]
#[command(name = "admin-gateway")]
#[command(about = "Leader-aware admin gateway node")]
#[command(version)]
struct Args {
    #[arg(long, help = "Bind host (overrides GATEWAY_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Bind port (overrides GATEWAY_PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up GATEWAY_* settings
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config: AppConfig = admin_gateway::config::config().clone();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Starting admin gateway in {:?} mode", config.environment);

    admin_gateway::server::run(&config).await
}
