use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use triptales_api::{
    config::Settings,
    db::{
        mongo::{create_mongo_client, MongoStore},
        Store,
    },
    routes, AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        log::info!("Release mode");
    }

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = match create_mongo_client(&settings.mongo_uri).await {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create MongoDB client: {}", e);
            std::process::exit(1);
        }
    };

    let store = MongoStore::new(&client, &settings.database);
    if let Err(e) = store.ping().await {
        log::error!("MongoDB is unreachable: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = store.ensure_indexes().await {
        log::error!("Failed to create indexes: {}", e);
        std::process::exit(1);
    }
    log::info!("MongoDB connection established");

    let state = AppState::new(Arc::new(store), settings.clone());
    log::info!("Starting HTTP server on {}:{}", settings.host, settings.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
