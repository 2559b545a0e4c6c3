use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use placement_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::rate_limit,
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let api = Router::new()
        .route(
            "/api/students",
            post(routes::student_routes::register_student),
        )
        .route("/api/students/:id", get(routes::student_routes::get_student))
        .route(
            "/api/students/:id/resume",
            post(routes::resume_routes::analyze_resume),
        )
        .route(
            "/api/students/:id/resume/latest",
            get(routes::resume_routes::latest_analysis),
        )
        .route(
            "/api/students/:id/resume/history",
            get(routes::resume_routes::analysis_history),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RequestBudget::per_second(config.public_rps),
            rate_limit::throttle_middleware,
        ));

    info!("Serving uploads from: {}", config.uploads_dir);

    let app = base_routes
        .merge(api)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(&config.uploads_dir),
        )
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
