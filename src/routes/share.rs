use actix_web::{web, HttpRequest, HttpResponse};

use crate::{
    error::ApiError,
    middleware::auth_context::AuthenticatedUser,
    models::response::{ApiResponse, ShareResponse},
    services::trip_service::TripService,
    AppState,
};

fn base_url(req: &HttpRequest, state: &AppState) -> String {
    match &state.settings.public_base_url {
        Some(base) => base.clone(),
        None => {
            let info = req.connection_info();
            format!("{}://{}", info.scheme(), info.host())
        }
    }
}

/*
    POST /api/trips/{id}/share
*/
pub async fn share(
    req: HttpRequest,
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let base = base_url(&req, &state);
    let link = TripService::new(state.store.clone())
        .share(&path.into_inner(), &user.user_id, &base)
        .await?;

    Ok(HttpResponse::Ok().json(ShareResponse {
        success: true,
        share_token: link.token,
        share_url: link.url,
    }))
}

/*
    GET /api/trips/share/{token}
*/
pub async fn get_by_token(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let trip = TripService::new(state.store.clone())
        .get_shared(&path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(trip)))
}
