use actix_web::{web, HttpResponse};

use crate::{
    error::ApiError,
    middleware::auth_context::AuthenticatedUser,
    models::{
        response::{ApiResponse, MessageResponse},
        trip::requests::{CreateTripRequest, UpdateTripRequest},
    },
    services::trip_service::TripService,
    AppState,
};

/*
    GET /api/trips
*/
pub async fn list(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let trips = TripService::new(state.store.clone()).list(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(trips)))
}

/*
    POST /api/trips
*/
pub async fn create(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    input: web::Json<CreateTripRequest>,
) -> Result<HttpResponse, ApiError> {
    let trip = TripService::new(state.store.clone())
        .create(&user.user_id, input.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::data(trip)))
}

/*
    GET /api/trips/{id}
*/
pub async fn get_by_id(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let trip = TripService::new(state.store.clone())
        .get(&path.into_inner(), &user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(trip)))
}

/*
    PUT /api/trips/{id}
*/
pub async fn update(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    input: web::Json<UpdateTripRequest>,
) -> Result<HttpResponse, ApiError> {
    let trip = TripService::new(state.store.clone())
        .update(&path.into_inner(), &user.user_id, input.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(trip)))
}

/*
    DELETE /api/trips/{id}
*/
pub async fn delete(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    TripService::new(state.store.clone())
        .delete(&path.into_inner(), &user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        success: true,
        message: "Trip deleted successfully".to_string(),
    }))
}
