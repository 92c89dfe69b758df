//! Verident server binary.
//!
//! Bootstraps configuration, tracing, and the adapter wiring, then serves the
//! dashboard API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use verident::adapters::eligibility::{HttpCoverageClient, HttpCredentialIssuer};
use verident::adapters::http::{api_router, AppState};
use verident::adapters::store::InMemoryCredentialStore;
use verident::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use verident::application::VerificationBroker;
use verident::config::AppConfig;
use verident::ports::{CoverageClient, CredentialIssuer, CredentialStore, PaymentProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let store: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::new());
    let issuer: Arc<dyn CredentialIssuer> =
        Arc::new(HttpCredentialIssuer::new(config.eligibility.clone()));
    let coverage: Arc<dyn CoverageClient> =
        Arc::new(HttpCoverageClient::new(config.eligibility.clone()));
    let broker = Arc::new(VerificationBroker::new(store, issuer, coverage));

    let payments: Option<Arc<dyn PaymentProvider>> = match &config.payment {
        Some(payment) => {
            tracing::info!(test_mode = payment.is_test_mode(), "payment endpoints enabled");
            Some(Arc::new(StripePaymentAdapter::new(StripeConfig::new(
                payment.stripe_secret_key.clone(),
            ))))
        }
        None => {
            tracing::warn!("no payment processor secret configured; payment endpoints disabled");
            None
        }
    };

    let state = AppState { broker, payments };

    let app = api_router().with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(cors_layer(&config)),
    );

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "verident backend listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Permissive CORS when no origins are configured (local development); an
/// explicit allowlist otherwise.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
