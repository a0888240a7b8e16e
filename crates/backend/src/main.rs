pub mod api;
pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::middleware;
    use axum::{
        routing::{get, post},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("backend.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // Keep application logs, silence SQL statement logs
                "info,sqlx=warn,sea_orm=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    // Initialize database (loads config from config.toml)
    shared::data::db::initialize_database()
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    // Auth tables + first admin user
    system::initialization::apply_auth_migration().await?;
    system::initialization::ensure_admin_user_exists().await?;

    // Seed the default roster on an empty installation
    domain::a002_employee::service::ensure_default_roster().await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // System users management (admin only)
        .route(
            "/api/system/users",
            get(system::handlers::users::list)
                .post(system::handlers::users::create)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id",
            get(system::handlers::users::get_by_id)
                .put(system::handlers::users::update)
                .delete(system::handlers::users::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id/change-password",
            post(system::handlers::users::change_password)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // SALE ENTRIES (a001)
        // ========================================
        .route(
            "/api/sale-entry",
            get(api::handlers::a001_sale_entry::list).post(api::handlers::a001_sale_entry::create),
        )
        .route(
            "/api/sale-entry/last",
            get(api::handlers::a001_sale_entry::last_entry),
        )
        .route(
            "/api/sale-entry/daily",
            get(api::handlers::a001_sale_entry::daily_ledger),
        )
        .route(
            "/api/sale-entry/export",
            get(api::handlers::a001_sale_entry::export_csv),
        )
        .route(
            "/api/sale-entry/:id",
            get(api::handlers::a001_sale_entry::get_by_id)
                .put(api::handlers::a001_sale_entry::update)
                .delete(api::handlers::a001_sale_entry::delete),
        )
        .route(
            "/api/sale-entry/day/:date",
            axum::routing::delete(api::handlers::a001_sale_entry::delete_day),
        )
        // ========================================
        // EMPLOYEE ROSTER (a002)
        // ========================================
        .route(
            "/api/employee",
            get(api::handlers::a002_employee::list_all).post(api::handlers::a002_employee::upsert),
        )
        .route(
            "/api/employee/:id",
            get(api::handlers::a002_employee::get_by_id)
                .delete(api::handlers::a002_employee::delete),
        )
        // D400 Period Summary Dashboard
        .route(
            "/api/d400/period_summary",
            get(api::handlers::d400_period_summary::get_period_summary),
        )
        .fallback_service(ServeDir::new("dist"))
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], 3000).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port 3000 is already in use. Please ensure no other process is using this port."
                );
            } else {
                tracing::error!("Failed to bind to port 3000. Error: {}", e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
