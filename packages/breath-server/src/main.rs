use breath_server::{
    cli::{Cli, Commands},
    config::ServerConfig,
    create_router,
    state::ServerState,
};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "breath_server=info,breath_filter=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Filter(args)) => {
            std::process::exit(args.execute());
        }
        Some(Commands::Serve) | None => {
            // Continue to run server
        }
    }

    let config = ServerConfig::from_env()?;

    info!("Starting Breath Server v{}", VERSION);
    info!("Configuration loaded:");
    info!("   Port: {}", config.port);
    info!("   Bind address: {}", config.bind_addr);
    info!("   CORS origins: {:?}", config.cors_origins);
    info!("   Max body size: {} bytes", config.max_body_size);
    info!("   Default window size: {}", config.default_window_size);

    let addr: SocketAddr = config.bind_address().parse()?;
    let state = Arc::new(ServerState::new(config));
    let app = create_router(state);

    info!("Listening on http://{}", addr);
    info!("Filter endpoint: http://{}/process_data", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
