use clap::Parser;
use mockapi::cli::Cli;
use mockapi::config::Settings;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new_with_cli(&cli)?;
    let host = settings.server.host.clone();
    let port = settings.server.port;

    if settings.routes.is_empty() {
        warn!(
            "No routes configured in {} or config/routes, every request will return 404",
            cli.config.display()
        );
    }

    let app = mockapi::create_app(&settings)?;
    info!("Registered {} route(s)", settings.routes.len());

    // Start server
    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!("Mock API Server running at http://{}:{}", host, port);
    axum::serve(listener, app).await?;

    Ok(())
}
