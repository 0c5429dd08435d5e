use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;

use focusboard::auth::AuthMiddleware;
use focusboard::config::Config;
use focusboard::routes;
use focusboard::services::CascadeMode;
use focusboard::state::AppState;
use focusboard::store::PgStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    let store = PgStore::new(pool);
    store
        .ensure_schema()
        .await
        .expect("Failed to prepare database schema");

    let cascade = if config.cascade_delete {
        CascadeMode::Cascade
    } else {
        CascadeMode::Orphan
    };
    let state = AppState::new(Arc::new(store), cascade, config.check_token_subject);

    log::info!("Starting FocusBoard server at {}", config.server_url());
    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
