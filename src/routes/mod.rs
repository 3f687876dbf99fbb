use actix_web::web;

use crate::{error::ApiError, middleware::auth::AuthMiddleware};

pub mod activity;
pub mod budget;
pub mod city;
pub mod health;
pub mod share;
pub mod stop;
pub mod trip;
pub mod user;

/// Registers every route plus the extractor configs that turn malformed
/// bodies and query strings into 400s with the standard error shape.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::validation(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::validation(err.to_string()).into()
    }))
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/api")
            .service(
                web::scope("/trips")
                    // Public routes
                    .route("/share/{token}", web::get().to(share::get_by_token))
                    // Protected routes
                    .service(
                        web::scope("")
                            .wrap(AuthMiddleware)
                            .route("", web::get().to(trip::list))
                            .route("", web::post().to(trip::create))
                            .route("/{id}", web::get().to(trip::get_by_id))
                            .route("/{id}", web::put().to(trip::update))
                            .route("/{id}", web::delete().to(trip::delete))
                            .route("/{id}/stops", web::post().to(stop::add))
                            .route("/{id}/stops/{stop_id}", web::put().to(stop::update))
                            .route("/{id}/stops/{stop_id}", web::delete().to(stop::remove))
                            .route(
                                "/{id}/stops/{stop_id}/activities",
                                web::post().to(stop::add_activity),
                            )
                            .route(
                                "/{id}/stops/{stop_id}/activities/{booking_id}",
                                web::delete().to(stop::remove_activity),
                            )
                            .route("/{id}/share", web::post().to(share::share))
                            .route("/{id}/budget", web::get().to(budget::get)),
                    ),
            )
            .service(
                web::scope("/cities")
                    .route("", web::get().to(city::search))
                    .route("", web::post().to(city::create))
                    .route("/popular", web::get().to(city::popular))
                    .route("/{id}", web::get().to(city::get_by_id)),
            )
            .service(
                web::scope("/activities")
                    .route("", web::get().to(activity::search))
                    .route("", web::post().to(activity::create))
                    .route("/{id}", web::get().to(activity::get_by_id)),
            )
            .service(
                web::scope("/users")
                    .wrap(AuthMiddleware)
                    .route(
                        "/saved-destinations",
                        web::get().to(user::saved_destinations),
                    )
                    .route(
                        "/saved-destinations",
                        web::post().to(user::add_saved_destination),
                    )
                    .route(
                        "/saved-destinations/{city_id}",
                        web::delete().to(user::remove_saved_destination),
                    ),
            ),
    );
}
