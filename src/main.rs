use gameplay_analyzer::{
    app_router, AnalysisOrchestrator, AppConfig, AppState, ConnectivityProbe,
    InMemoryProfileRepository, InMemorySessionRepository, OllamaClient, TextGenerator,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gameplay_analyzer=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting gameplay analyzer");

    let config = AppConfig::from_env();

    // Create shared application state with dependency injection
    let generator: Arc<dyn TextGenerator> = Arc::new(OllamaClient::new(&config.ai));
    let probe = Arc::new(ConnectivityProbe::new(
        generator.clone(),
        config.ai.recheck_interval,
    ));
    let orchestrator = Arc::new(AnalysisOrchestrator::new(
        generator,
        probe.clone(),
        config.ai.generation_timeout,
    ));

    let app_state = AppState::new(
        Arc::new(InMemorySessionRepository::new()),
        Arc::new(InMemoryProfileRepository::new()),
        orchestrator,
    );

    // Probe in the background so a slow model load doesn't delay startup
    tokio::spawn(async move {
        probe.initialize().await;
    });

    let app = app_router(app_state, config.static_dir.as_deref());

    let address = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(address = %address, error = %e, "Failed to bind listener");
            std::process::exit(1);
        }
    };
    info!("Server running on http://{}", address);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server terminated");
        std::process::exit(1);
    }
}
