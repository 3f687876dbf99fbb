use actix_web::{web, HttpResponse};

use crate::{
    error::ApiError,
    middleware::auth_context::AuthenticatedUser,
    models::{activity::NewActivity, response::ApiResponse, search::ActivityQuery},
    services::catalog_service::CatalogService,
    AppState,
};

/*
    GET /api/activities?city=&type=&minCost=&maxCost=&minDuration=&maxDuration=&search=&sortBy=
*/
pub async fn search(
    state: web::Data<AppState>,
    params: web::Query<ActivityQuery>,
) -> Result<HttpResponse, ApiError> {
    let activities = CatalogService::new(state.store.clone())
        .search_activities(&params)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(activities)))
}

/*
    GET /api/activities/{id}
*/
pub async fn get_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let activity = CatalogService::new(state.store.clone())
        .get_activity(&path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(activity)))
}

/*
    POST /api/activities
*/
pub async fn create(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    input: web::Json<NewActivity>,
) -> Result<HttpResponse, ApiError> {
    log::debug!("User {} ({}) adding an activity", user.user_id, user.email);
    let activity = CatalogService::new(state.store.clone())
        .create_activity(input.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::data(activity)))
}
