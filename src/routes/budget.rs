use actix_web::{web, HttpResponse};

use crate::{
    error::ApiError, middleware::auth_context::AuthenticatedUser, models::response::ApiResponse,
    services::trip_service::TripService, AppState,
};

/*
    GET /api/trips/{id}/budget
*/
pub async fn get(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let summary = TripService::new(state.store.clone())
        .budget(&path.into_inner(), &user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(summary)))
}
