use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    ActivityRepository, CityRepository, SavedDestinationRepository, Store, StoreError,
    TripRepository,
};
use crate::models::{
    activity::Activity,
    city::City,
    search::{ActivityQuery, CityQuery},
    trip::Trip,
};

/// In-memory storage for tests and local development.
///
/// Catalog collections keep insertion order so equal sort keys come back the
/// way they went in.
#[derive(Default)]
pub struct MemoryStore {
    trips: RwLock<HashMap<String, Trip>>,
    cities: RwLock<Vec<City>>,
    activities: RwLock<Vec<Activity>>,
    saved: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn share_token_taken(trips: &HashMap<String, Trip>, trip: &Trip) -> bool {
    match &trip.share_token {
        Some(token) => trips.values().any(|other| {
            other.id != trip.id && other.share_token.as_deref() == Some(token.as_str())
        }),
        None => false,
    }
}

#[async_trait]
impl TripRepository for MemoryStore {
    async fn insert_trip(&self, trip: &Trip) -> Result<(), StoreError> {
        let mut trips = self.trips.write().await;
        if trips.contains_key(&trip.id) {
            return Err(StoreError::DuplicateKey("_id".to_string()));
        }
        if share_token_taken(&trips, trip) {
            return Err(StoreError::DuplicateKey("shareToken".to_string()));
        }
        trips.insert(trip.id.clone(), trip.clone());
        Ok(())
    }

    async fn find_trip(&self, id: &str) -> Result<Option<Trip>, StoreError> {
        Ok(self.trips.read().await.get(id).cloned())
    }

    async fn find_trip_by_share_token(&self, token: &str) -> Result<Option<Trip>, StoreError> {
        let trips = self.trips.read().await;
        Ok(trips
            .values()
            .find(|trip| trip.share_token.as_deref() == Some(token))
            .cloned())
    }

    async fn trips_for_user(&self, user_id: &str) -> Result<Vec<Trip>, StoreError> {
        let trips = self.trips.read().await;
        Ok(trips
            .values()
            .filter(|trip| trip.user == user_id)
            .cloned()
            .collect())
    }

    async fn replace_trip(&self, trip: &Trip) -> Result<(), StoreError> {
        let mut trips = self.trips.write().await;
        if share_token_taken(&trips, trip) {
            return Err(StoreError::DuplicateKey("shareToken".to_string()));
        }
        match trips.get_mut(&trip.id) {
            Some(existing) => {
                *existing = trip.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound("Trip")),
        }
    }

    async fn delete_trip(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.trips.write().await.remove(id).is_some())
    }
}

#[async_trait]
impl CityRepository for MemoryStore {
    async fn insert_city(&self, city: &City) -> Result<(), StoreError> {
        let mut cities = self.cities.write().await;
        if cities.iter().any(|c| c.id == city.id) {
            return Err(StoreError::DuplicateKey("_id".to_string()));
        }
        cities.push(city.clone());
        Ok(())
    }

    async fn find_city(&self, id: &str) -> Result<Option<City>, StoreError> {
        Ok(self.cities.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn cities_by_ids(&self, ids: &[String]) -> Result<Vec<City>, StoreError> {
        let cities = self.cities.read().await;
        Ok(cities.iter().filter(|c| ids.contains(&c.id)).cloned().collect())
    }

    async fn search_cities(
        &self,
        query: &CityQuery,
        limit: usize,
    ) -> Result<Vec<City>, StoreError> {
        let cities = self.cities.read().await;
        let mut found: Vec<City> =
            cities.iter().filter(|c| query.matches(c)).cloned().collect();
        found.sort_by(|a, b| query.sort_by.compare_cities(a, b));
        found.truncate(limit);
        Ok(found)
    }
}

#[async_trait]
impl ActivityRepository for MemoryStore {
    async fn insert_activity(&self, activity: &Activity) -> Result<(), StoreError> {
        let mut activities = self.activities.write().await;
        if activities.iter().any(|a| a.id == activity.id) {
            return Err(StoreError::DuplicateKey("_id".to_string()));
        }
        activities.push(activity.clone());
        Ok(())
    }

    async fn find_activity(&self, id: &str) -> Result<Option<Activity>, StoreError> {
        Ok(self.activities.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn activities_by_ids(&self, ids: &[String]) -> Result<Vec<Activity>, StoreError> {
        let activities = self.activities.read().await;
        Ok(activities.iter().filter(|a| ids.contains(&a.id)).cloned().collect())
    }

    async fn search_activities(
        &self,
        query: &ActivityQuery,
        limit: usize,
    ) -> Result<Vec<Activity>, StoreError> {
        let activities = self.activities.read().await;
        let mut found: Vec<Activity> =
            activities.iter().filter(|a| query.matches(a)).cloned().collect();
        found.sort_by(|a, b| query.sort_by.compare_activities(a, b));
        found.truncate(limit);
        Ok(found)
    }
}

#[async_trait]
impl SavedDestinationRepository for MemoryStore {
    async fn saved_destinations(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.saved.read().await.get(user_id).cloned().unwrap_or_default())
    }

    async fn add_saved_destination(&self, user_id: &str, city_id: &str) -> Result<(), StoreError> {
        let mut saved = self.saved.write().await;
        let cities = saved.entry(user_id.to_string()).or_default();
        if !cities.iter().any(|id| id == city_id) {
            cities.push(city_id.to_string());
        }
        Ok(())
    }

    async fn remove_saved_destination(
        &self,
        user_id: &str,
        city_id: &str,
    ) -> Result<(), StoreError> {
        if let Some(cities) = self.saved.write().await.get_mut(user_id) {
            cities.retain(|id| id != city_id);
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
