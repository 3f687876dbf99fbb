#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{web, App};
use jsonwebtoken::{encode, EncodingKey, Header};

use triptales_api::{
    config::Settings,
    db::{memory::MemoryStore, ActivityRepository, CityRepository},
    middleware::auth::Claims,
    models::{
        activity::{Activity, NewActivity},
        city::{City, NewCity},
    },
    routes, AppState,
};

pub const JWT_SECRET: &str = "test-secret";

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), Settings::local(JWT_SECRET));
        Self { store, state }
    }

    pub fn with_base_url(base: &str) -> Self {
        let mut app = Self::new();
        app.state.settings.public_base_url = Some(base.to_string());
        app
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .configure(routes::configure)
    }

    pub async fn seed_city(
        &self,
        name: &str,
        country: &str,
        cost_index: f64,
        popularity: f64,
    ) -> City {
        let city = serde_json::from_value::<NewCity>(serde_json::json!({
            "name": name,
            "country": country,
            "costIndex": cost_index,
            "popularity": popularity
        }))
        .unwrap()
        .into_city()
        .unwrap();
        self.store.insert_city(&city).await.unwrap();
        city
    }

    pub async fn seed_activity(
        &self,
        name: &str,
        city: &City,
        kind: &str,
        cost: f64,
        rating: f64,
    ) -> Activity {
        let activity = serde_json::from_value::<NewActivity>(serde_json::json!({
            "name": name,
            "city": city.id,
            "type": kind,
            "cost": cost,
            "rating": rating
        }))
        .unwrap()
        .into_activity()
        .unwrap();
        self.store.insert_activity(&activity).await.unwrap();
        activity
    }
}

/// A signed bearer header value for `user_id`.
pub fn bearer(user_id: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: format!("{}@example.com", user_id),
        exp: (now + 3600) as usize,
        iat: now as usize,
        user_id: user_id.to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();
    format!("Bearer {}", token)
}
