pub mod documents;
pub mod memory;
pub mod mongo;

use std::fmt;

use async_trait::async_trait;

use crate::models::{
    activity::Activity,
    city::City,
    search::{ActivityQuery, CityQuery},
    trip::Trip,
};

#[derive(Debug)]
pub enum StoreError {
    Database(mongodb::error::Error),
    /// A unique index rejected the write. Carries the offending field.
    DuplicateKey(String),
    /// A write matched no document. Carries the entity name.
    NotFound(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(err) => write!(f, "Database error: {}", err),
            StoreError::DuplicateKey(field) => {
                write!(f, "Duplicate value for unique field {}", field)
            }
            StoreError::NotFound(entity) => write!(f, "{} not found", entity),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(err) => Some(err),
            StoreError::DuplicateKey(_) | StoreError::NotFound(_) => None,
        }
    }
}

/// Trips are stored whole: stops and bookings are embedded, so every write
/// replaces the full aggregate.
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn insert_trip(&self, trip: &Trip) -> Result<(), StoreError>;

    async fn find_trip(&self, id: &str) -> Result<Option<Trip>, StoreError>;

    async fn find_trip_by_share_token(&self, token: &str) -> Result<Option<Trip>, StoreError>;

    async fn trips_for_user(&self, user_id: &str) -> Result<Vec<Trip>, StoreError>;

    /// Fails with [`StoreError::NotFound`] when the trip is gone.
    async fn replace_trip(&self, trip: &Trip) -> Result<(), StoreError>;

    /// Returns whether a trip was removed.
    async fn delete_trip(&self, id: &str) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait CityRepository: Send + Sync {
    async fn insert_city(&self, city: &City) -> Result<(), StoreError>;

    async fn find_city(&self, id: &str) -> Result<Option<City>, StoreError>;

    async fn cities_by_ids(&self, ids: &[String]) -> Result<Vec<City>, StoreError>;

    /// Filtered, sorted and capped at `limit`.
    async fn search_cities(
        &self,
        query: &CityQuery,
        limit: usize,
    ) -> Result<Vec<City>, StoreError>;
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn insert_activity(&self, activity: &Activity) -> Result<(), StoreError>;

    async fn find_activity(&self, id: &str) -> Result<Option<Activity>, StoreError>;

    async fn activities_by_ids(&self, ids: &[String]) -> Result<Vec<Activity>, StoreError>;

    async fn search_activities(
        &self,
        query: &ActivityQuery,
        limit: usize,
    ) -> Result<Vec<Activity>, StoreError>;
}

/// City ids a user has bookmarked, in the order they were saved.
#[async_trait]
pub trait SavedDestinationRepository: Send + Sync {
    async fn saved_destinations(&self, user_id: &str) -> Result<Vec<String>, StoreError>;

    /// No-op when the city is already saved.
    async fn add_saved_destination(&self, user_id: &str, city_id: &str) -> Result<(), StoreError>;

    async fn remove_saved_destination(
        &self,
        user_id: &str,
        city_id: &str,
    ) -> Result<(), StoreError>;
}

#[async_trait]
pub trait Store:
    TripRepository + CityRepository + ActivityRepository + SavedDestinationRepository
{
    async fn ping(&self) -> Result<(), StoreError>;
}
