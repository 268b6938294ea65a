use std::process::ExitCode;
use std::sync::Arc;

use indicator_updates::{
    app,
    config::AppConfig,
    services::store::PgIndicatorStore,
    telemetry::init_tracing,
    utils::constant::DB_ACQUIRE_TIMEOUT,
};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_format);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server terminated");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db_pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(DB_ACQUIRE_TIMEOUT)
        .connect(config.database_url.expose_secret())
        .await?;

    sqlx::migrate!("./migrations").run(&db_pool).await?;
    info!("Database migrations applied");

    let addr = config.bind_address;
    let app = app(config, Arc::new(PgIndicatorStore::new(db_pool)));

    let listener = TcpListener::bind(addr).await?;
    info!("Server starting at http://{}", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
