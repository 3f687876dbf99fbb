use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    db::Store,
    error::ApiError,
    models::saved_destination::{SaveDestinationRequest, SavedDestination},
};

/// A user's bookmarked cities. The list lives on the user record and keeps
/// the order cities were saved in.
pub struct SavedDestinationService {
    store: Arc<dyn Store>,
}

impl SavedDestinationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Cities removed from the catalog since they were saved are left out.
    pub async fn list(&self, user_id: &str) -> Result<Vec<SavedDestination>, ApiError> {
        let ids = self.store.saved_destinations(user_id).await?;
        let mut cities: HashMap<String, _> = self
            .store
            .cities_by_ids(&ids)
            .await?
            .into_iter()
            .map(|city| (city.id.clone(), city))
            .collect();

        Ok(ids
            .iter()
            .filter_map(|id| cities.remove(id))
            .map(SavedDestination::from)
            .collect())
    }

    pub async fn add(
        &self,
        user_id: &str,
        input: SaveDestinationRequest,
    ) -> Result<Vec<SavedDestination>, ApiError> {
        let city_id = input.validate()?;
        if self.store.find_city(&city_id).await?.is_none() {
            return Err(ApiError::not_found("City not found"));
        }
        self.store.add_saved_destination(user_id, &city_id).await?;
        log::info!("User {} saved city {}", user_id, city_id);
        self.list(user_id).await
    }

    /// Removing a city that was never saved is not an error.
    pub async fn remove(
        &self,
        user_id: &str,
        city_id: &str,
    ) -> Result<Vec<SavedDestination>, ApiError> {
        self.store.remove_saved_destination(user_id, city_id).await?;
        self.list(user_id).await
    }
}
