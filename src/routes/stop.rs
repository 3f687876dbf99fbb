use actix_web::{web, HttpResponse};

use crate::{
    error::ApiError,
    middleware::auth_context::AuthenticatedUser,
    models::{
        response::ApiResponse,
        trip::requests::{AddBookingRequest, AddStopRequest, UpdateStopRequest},
    },
    services::trip_service::TripService,
    AppState,
};

/*
    POST /api/trips/{id}/stops
*/
pub async fn add(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    input: web::Json<AddStopRequest>,
) -> Result<HttpResponse, ApiError> {
    let trip = TripService::new(state.store.clone())
        .add_stop(&path.into_inner(), &user.user_id, input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(trip)))
}

/*
    PUT /api/trips/{id}/stops/{stop_id}
*/
pub async fn update(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
    input: web::Json<UpdateStopRequest>,
) -> Result<HttpResponse, ApiError> {
    let (trip_id, stop_id) = path.into_inner();
    let trip = TripService::new(state.store.clone())
        .update_stop(&trip_id, &stop_id, &user.user_id, input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(trip)))
}

/*
    DELETE /api/trips/{id}/stops/{stop_id}
*/
pub async fn remove(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (trip_id, stop_id) = path.into_inner();
    let trip = TripService::new(state.store.clone())
        .remove_stop(&trip_id, &stop_id, &user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(trip)))
}

/*
    POST /api/trips/{id}/stops/{stop_id}/activities
*/
pub async fn add_activity(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
    input: web::Json<AddBookingRequest>,
) -> Result<HttpResponse, ApiError> {
    let (trip_id, stop_id) = path.into_inner();
    let trip = TripService::new(state.store.clone())
        .add_booking(&trip_id, &stop_id, &user.user_id, input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(trip)))
}

/*
    DELETE /api/trips/{id}/stops/{stop_id}/activities/{booking_id}
*/
pub async fn remove_activity(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<(String, String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (trip_id, stop_id, booking_id) = path.into_inner();
    let trip = TripService::new(state.store.clone())
        .remove_booking(&trip_id, &stop_id, &booking_id, &user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(trip)))
}
