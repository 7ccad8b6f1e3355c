use std::net::SocketAddr;

use rating_server::cache::{CacheConfig, CachedMapsClient};
use rating_server::live::LiveProvider;
use rating_server::maps::{MapsClient, MapsConfig, MockProvider};
use rating_server::rating::{RatingConfig, RatingEngine, RatingProvider};
use rating_server::stops::StopCatalog;
use rating_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_STOPS_FILE: &str = "data/stops.json";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .expect("BIND_ADDR must be host:port");

    let config = RatingConfig::default();

    // Serve from a fixture file instead of the live API when asked
    if let Ok(path) = std::env::var("MOCK_PROVIDER_FILE") {
        let provider = MockProvider::from_file(&path).expect("Failed to load mock provider data");
        info!(path = %path, "using mock provider");
        serve(RatingEngine::new(provider, config), addr).await;
        return;
    }

    let api_key = std::env::var("MAPS_API_KEY").unwrap_or_else(|_| {
        warn!("MAPS_API_KEY not set. API calls will fail.");
        String::new()
    });

    let stops_file =
        std::env::var("STOPS_FILE").unwrap_or_else(|_| DEFAULT_STOPS_FILE.to_string());
    let stops = StopCatalog::load(&stops_file).expect("Failed to load stop catalogue");
    info!(path = %stops_file, stops = stops.len(), "loaded stop catalogue");

    let maps_client = MapsClient::new(MapsConfig::new(api_key)).expect("Failed to create maps client");
    let cached_maps = CachedMapsClient::new(maps_client, &CacheConfig::default());

    let provider = LiveProvider::new(cached_maps, stops, config.area);
    serve(RatingEngine::new(provider, config), addr).await;
}

async fn serve<P>(engine: RatingEngine<P>, addr: SocketAddr)
where
    P: RatingProvider + Send + 'static,
{
    let app = create_router(AppState::new(engine));

    info!("Address rating server listening on http://{addr}");
    info!("  GET  /health  - Health check");
    info!("  POST /rank    - Rate and rank candidate addresses");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
