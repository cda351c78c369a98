//! Tempus Server - Workforce Time and Attendance

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tempus_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tempus_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tempus Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone(), &config.storage);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/logout", post(api::auth::logout))
        .route("/auth/me", get(api::auth::me))
        // User accounts
        .route("/users", post(api::users::create_user))
        // Terminal clock
        .route("/clock/time", get(api::clock::server_time))
        .route("/clock/check-in", post(api::clock::check_in))
        .route("/clock/photo", post(api::clock::attach_photo))
        // Properties
        .route("/properties", get(api::properties::list_properties))
        .route("/properties", post(api::properties::create_property))
        .route("/properties/:id", get(api::properties::get_property))
        .route("/properties/:id", put(api::properties::update_property))
        .route("/properties/:id", delete(api::properties::delete_property))
        .route("/properties/:id/cascade", delete(api::properties::delete_property_cascade))
        // Areas
        .route("/areas", get(api::areas::list_areas))
        .route("/areas", post(api::areas::create_area))
        .route("/areas/:id", get(api::areas::get_area))
        .route("/areas/:id", put(api::areas::update_area))
        .route("/areas/:id", delete(api::areas::delete_area))
        // Schedules
        .route("/schedules", get(api::schedules::list_schedules))
        .route("/schedules", post(api::schedules::create_schedule))
        .route("/schedules/available-links", get(api::schedules::available_links))
        .route("/schedules/:id", get(api::schedules::get_schedule))
        .route("/schedules/:id", put(api::schedules::update_schedule))
        .route("/schedules/:id", delete(api::schedules::delete_schedule))
        // Employees
        .route("/employees", get(api::employees::list_employees))
        .route("/employees", post(api::employees::create_employee))
        .route("/employees/area-links", get(api::employees::area_links))
        .route("/employees/:id", get(api::employees::get_employee))
        .route("/employees/:id", put(api::employees::update_employee))
        .route("/employees/:id", delete(api::employees::delete_employee))
        // Live updates
        .route("/events/properties", get(api::events::property_events))
        .route("/events/areas", get(api::events::area_events))
        .route("/events/employees", get(api::events::employee_events))
        .route("/events/schedules", get(api::events::schedule_events))
        .route("/events/attendance", get(api::events::attendance_events))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
