use actix_web::{web, HttpResponse};

use crate::{
    error::ApiError,
    middleware::auth_context::AuthenticatedUser,
    models::{city::NewCity, response::ApiResponse, search::CityQuery},
    services::catalog_service::CatalogService,
    AppState,
};

/*
    GET /api/cities?search=&country=&region=&minCost=&maxCost=&sortBy=
*/
pub async fn search(
    state: web::Data<AppState>,
    params: web::Query<CityQuery>,
) -> Result<HttpResponse, ApiError> {
    let cities = CatalogService::new(state.store.clone())
        .search_cities(&params)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(cities)))
}

/*
    GET /api/cities/popular
*/
pub async fn popular(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let cities = CatalogService::new(state.store.clone()).popular_cities().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(cities)))
}

/*
    GET /api/cities/{id}
*/
pub async fn get_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let city = CatalogService::new(state.store.clone())
        .get_city(&path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(city)))
}

/*
    POST /api/cities
*/
pub async fn create(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    input: web::Json<NewCity>,
) -> Result<HttpResponse, ApiError> {
    log::debug!("User {} ({}) adding a city", user.user_id, user.email);
    let city = CatalogService::new(state.store.clone())
        .create_city(input.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::data(city)))
}
