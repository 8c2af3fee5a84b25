use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use talentflow_backend::config::{get_config, init_config};
use talentflow_backend::database::pool::create_pool;
use talentflow_backend::database::MIGRATOR;
use talentflow_backend::routes::api_router;
use talentflow_backend::store::seed;
use talentflow_backend::utils::latency::Latency;
use talentflow_backend::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    MIGRATOR.run(&pool).await?;

    if config.seed_on_start {
        let report = seed::initialize(&pool).await?;
        info!(
            jobs = report.jobs,
            candidates = report.candidates,
            assessments = report.assessments,
            "seed check complete"
        );
    }

    let latency = Latency::new(config.latency_min_ms, config.latency_max_ms);
    let state = AppState::new(pool, latency);

    let app = api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = TcpListener::bind(&config.server_address).await?;
    info!("listening on {}", config.server_address);
    axum::serve(listener, app).await?;

    Ok(())
}
