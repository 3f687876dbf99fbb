use actix_web::{web, HttpResponse};

use crate::{
    error::ApiError,
    middleware::auth_context::AuthenticatedUser,
    models::{response::ApiResponse, saved_destination::SaveDestinationRequest},
    services::saved_destination_service::SavedDestinationService,
    AppState,
};

/*
    GET /api/users/saved-destinations
*/
pub async fn saved_destinations(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let saved = SavedDestinationService::new(state.store.clone())
        .list(&user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(saved)))
}

/*
    POST /api/users/saved-destinations
*/
pub async fn add_saved_destination(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    input: web::Json<SaveDestinationRequest>,
) -> Result<HttpResponse, ApiError> {
    let saved = SavedDestinationService::new(state.store.clone())
        .add(&user.user_id, input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(saved)))
}

/*
    DELETE /api/users/saved-destinations/{city_id}
*/
pub async fn remove_saved_destination(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let saved = SavedDestinationService::new(state.store.clone())
        .remove(&user.user_id, &path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(saved)))
}
