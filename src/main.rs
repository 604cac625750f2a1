use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};

use seo_agent::config::Config;
use seo_agent::db;
use seo_agent::routes;
use seo_agent::service::ReportPipeline;

/// Initialize logging with tracing_subscriber.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sqlx=warn".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .compact()
        .with_target(false)
        .init();
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env();
    let pool = db::init_db(&config.database_url).await?;
    log::info!("[MAIN] Connected to database");

    let pipeline = web::Data::new(ReportPipeline::from_config(&config, pool)?);
    let allowed_origins = config.allowed_origins.clone();
    let bind_addr = config.bind_addr.clone();

    log::info!("[MAIN] SEO report service listening on {}", bind_addr);
    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .app_data(pipeline.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
