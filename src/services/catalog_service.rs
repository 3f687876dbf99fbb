use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    db::Store,
    error::ApiError,
    models::{
        activity::{Activity, ActivityListing, NewActivity},
        city::{City, CitySummary, NewCity},
        search::{ActivityQuery, CityQuery, MAX_RESULTS, POPULAR_CITY_LIMIT},
    },
};

/// Read-mostly access to the city and activity reference data.
pub struct CatalogService {
    store: Arc<dyn Store>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn search_cities(&self, query: &CityQuery) -> Result<Vec<City>, ApiError> {
        Ok(self.store.search_cities(query, MAX_RESULTS).await?)
    }

    pub async fn popular_cities(&self) -> Result<Vec<City>, ApiError> {
        Ok(self
            .store
            .search_cities(&CityQuery::default(), POPULAR_CITY_LIMIT)
            .await?)
    }

    pub async fn get_city(&self, id: &str) -> Result<City, ApiError> {
        self.store
            .find_city(id)
            .await?
            .ok_or_else(|| ApiError::not_found("City not found"))
    }

    pub async fn create_city(&self, input: NewCity) -> Result<City, ApiError> {
        let city = input.into_city()?;
        self.store.insert_city(&city).await?;
        log::info!("Created city {} ({})", city.name, city.id);
        Ok(city)
    }

    pub async fn search_activities(
        &self,
        query: &ActivityQuery,
    ) -> Result<Vec<ActivityListing>, ApiError> {
        let activities = self.store.search_activities(query, MAX_RESULTS).await?;
        self.with_cities(activities).await
    }

    pub async fn get_activity(&self, id: &str) -> Result<ActivityListing, ApiError> {
        let activity = self
            .store
            .find_activity(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Activity not found"))?;
        let city = self.store.find_city(&activity.city).await?;
        Ok(ActivityListing::new(activity, city.as_ref().map(CitySummary::from)))
    }

    pub async fn create_activity(&self, input: NewActivity) -> Result<Activity, ApiError> {
        let activity = input.into_activity()?;
        if self.store.find_city(&activity.city).await?.is_none() {
            return Err(ApiError::not_found("City not found"));
        }
        self.store.insert_activity(&activity).await?;
        log::info!("Created activity {} ({})", activity.name, activity.id);
        Ok(activity)
    }

    async fn with_cities(
        &self,
        activities: Vec<Activity>,
    ) -> Result<Vec<ActivityListing>, ApiError> {
        let mut city_ids: Vec<String> = activities.iter().map(|a| a.city.clone()).collect();
        city_ids.sort();
        city_ids.dedup();

        let cities: HashMap<String, CitySummary> = self
            .store
            .cities_by_ids(&city_ids)
            .await?
            .iter()
            .map(|city| (city.id.clone(), CitySummary::from(city)))
            .collect();

        Ok(activities
            .into_iter()
            .map(|activity| {
                let city = cities.get(&activity.city).cloned();
                ActivityListing::new(activity, city)
            })
            .collect())
    }
}
