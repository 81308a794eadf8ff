use blakely_backend::{build_router, AppServices};
use blakely_common::{logging, BlakelyError};
use blakely_config::load_config;
use blakely_db::{BookingRepository, DbClient, SqlBookingRepository};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BlakelyError> {
    let config = Arc::new(load_config().map_err(|e| BlakelyError::ConfigError(e.to_string()))?);

    let db_client = DbClient::new(&config).await?;
    if !db_client.is_healthy().await {
        return Err(BlakelyError::DatabaseError(
            "database did not answer a test query".to_string(),
        ));
    }
    let repository = SqlBookingRepository::new(db_client);
    repository.init_schema().await?;

    let services = AppServices {
        config: config.clone(),
        repository: Arc::new(repository),
        #[cfg(feature = "stripe")]
        payment_service: stripe_service(&config)?,
    };

    let app = build_router(&services);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| BlakelyError::ConfigError(format!("cannot bind {}: {}", addr, e)))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BlakelyError::InternalError(e.to_string()))
}

#[cfg(feature = "stripe")]
type CheckoutService =
    Arc<dyn blakely_common::services::PaymentService<Error = blakely_stripe::StripeError>>;

#[cfg(feature = "stripe")]
fn stripe_service(config: &blakely_config::AppConfig) -> Result<Option<CheckoutService>, BlakelyError> {
    if !blakely_common::is_stripe_enabled(config) {
        info!("Stripe checkout disabled");
        return Ok(None);
    }
    let Some(stripe_config) = config.stripe.as_ref() else {
        return Ok(None);
    };
    let service = blakely_stripe::StripePaymentService::from_config(stripe_config)
        .map_err(|e| BlakelyError::ConfigError(e.to_string()))?;
    let service: CheckoutService = Arc::new(service);
    Ok(Some(service))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
