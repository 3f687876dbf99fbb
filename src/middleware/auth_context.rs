use std::future::{ready, Ready};

use actix_web::{dev::Payload, Error, FromRequest, HttpMessage, HttpRequest};

use crate::{error::ApiError, middleware::auth::Claims};

use super::auth::{jwt_secret, verify_bearer};

/// The caller identity handed over by the auth collaborator.
///
/// Uses the claims left by [`AuthMiddleware`](super::auth::AuthMiddleware) when
/// present, otherwise verifies the bearer token itself so single routes can
/// require auth without a wrapping scope.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        AuthenticatedUser {
            user_id: claims.user_id,
            email: claims.sub,
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(claims) = req.extensions().get::<Claims>() {
            return ready(Ok(AuthenticatedUser::from(claims.clone())));
        }

        let result = match jwt_secret(req) {
            Some(secret) => verify_bearer(req.headers(), &secret).map(AuthenticatedUser::from),
            None => Err(ApiError::Unauthenticated("User not authenticated".to_string())),
        };
        ready(result.map_err(Error::from))
    }
}
