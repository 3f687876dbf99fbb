use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion},
    Client, Collection, Database, IndexModel,
};
use std::time::Duration;

use super::{
    documents::{
        id_to_bson, ids_to_bson, ActivityDocument, CityDocument, SavedDestinationsDocument,
        TripDocument,
    },
    ActivityRepository, CityRepository, SavedDestinationRepository, Store, StoreError,
    TripRepository,
};
use crate::models::{
    activity::Activity,
    city::City,
    search::{non_empty, ActivityQuery, CityQuery, SortBy},
    trip::Trip,
};

const TRIPS: &str = "trips";
const CITIES: &str = "cities";
const ACTIVITIES: &str = "activities";
const USERS: &str = "users";
const DUPLICATE_KEY_CODE: i32 = 11000;

pub async fn create_mongo_client(uri: &str) -> Result<Client, mongodb::error::Error> {
    log::info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    Client::with_options(client_options)
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(err)
    }
}

fn write_error(err: mongodb::error::Error, field: &str) -> StoreError {
    let duplicate = matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE
    );
    if duplicate {
        StoreError::DuplicateKey(field.to_string())
    } else {
        StoreError::Database(err)
    }
}

fn case_insensitive(text: &str) -> Document {
    doc! { "$regex": regex::escape(text), "$options": "i" }
}

fn range<T: Into<bson::Bson>>(min: Option<T>, max: Option<T>) -> Option<Document> {
    let mut bounds = Document::new();
    if let Some(min) = min {
        bounds.insert("$gte", min.into());
    }
    if let Some(max) = max {
        bounds.insert("$lte", max.into());
    }
    (!bounds.is_empty()).then_some(bounds)
}

fn city_filter(query: &CityQuery) -> Document {
    let mut filter = Document::new();
    if let Some(search) = non_empty(&query.search) {
        filter.insert(
            "$or",
            vec![
                doc! { "name": case_insensitive(search) },
                doc! { "country": case_insensitive(search) },
            ],
        );
    }
    if let Some(country) = non_empty(&query.country) {
        filter.insert("country", case_insensitive(country));
    }
    if let Some(region) = non_empty(&query.region) {
        filter.insert("region", case_insensitive(region));
    }
    if let Some(bounds) = range(query.min_cost, query.max_cost) {
        filter.insert("costIndex", bounds);
    }
    filter
}

fn city_sort(sort_by: SortBy) -> Document {
    match sort_by {
        SortBy::Popularity => doc! { "popularity": -1 },
        SortBy::Cost => doc! { "costIndex": 1 },
        SortBy::Name => doc! { "name": 1 },
    }
}

fn activity_filter(query: &ActivityQuery) -> Document {
    let mut filter = Document::new();
    if let Some(city) = non_empty(&query.city) {
        filter.insert("city", id_to_bson(city));
    }
    if let Some(kind) = query.kind {
        filter.insert("type", kind.as_str());
    }
    if let Some(bounds) = range(query.min_cost, query.max_cost) {
        filter.insert("cost", bounds);
    }
    if let Some(bounds) = range(
        query.min_duration.map(i64::from),
        query.max_duration.map(i64::from),
    ) {
        filter.insert("duration", bounds);
    }
    if let Some(search) = non_empty(&query.search) {
        filter.insert("name", case_insensitive(search));
    }
    filter
}

fn activity_sort(sort_by: SortBy) -> Document {
    match sort_by {
        SortBy::Popularity => doc! { "rating": -1 },
        SortBy::Cost => doc! { "cost": 1 },
        SortBy::Name => doc! { "name": 1 },
    }
}

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(client: &Client, database: &str) -> Self {
        Self {
            db: client.database(database),
        }
    }

    fn trips(&self) -> Collection<TripDocument> {
        self.db.collection(TRIPS)
    }

    fn cities(&self) -> Collection<CityDocument> {
        self.db.collection(CITIES)
    }

    fn activities(&self) -> Collection<ActivityDocument> {
        self.db.collection(ACTIVITIES)
    }

    fn users(&self) -> Collection<SavedDestinationsDocument> {
        self.db.collection(USERS)
    }

    /// Share tokens are unique among the trips that carry one.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let share_token = IndexModel::builder()
            .keys(doc! { "shareToken": 1 })
            .options(IndexOptions::builder().unique(true).sparse(true).build())
            .build();
        self.trips().create_index(share_token).await?;

        let owner = IndexModel::builder().keys(doc! { "user": 1 }).build();
        self.trips().create_index(owner).await?;
        Ok(())
    }
}

#[async_trait]
impl TripRepository for MongoStore {
    async fn insert_trip(&self, trip: &Trip) -> Result<(), StoreError> {
        self.trips()
            .insert_one(TripDocument::from(trip))
            .await
            .map_err(|e| write_error(e, "shareToken"))?;
        Ok(())
    }

    async fn find_trip(&self, id: &str) -> Result<Option<Trip>, StoreError> {
        let found = self.trips().find_one(doc! { "_id": id_to_bson(id) }).await?;
        Ok(found.map(Trip::from))
    }

    async fn find_trip_by_share_token(&self, token: &str) -> Result<Option<Trip>, StoreError> {
        let found = self.trips().find_one(doc! { "shareToken": token }).await?;
        Ok(found.map(Trip::from))
    }

    async fn trips_for_user(&self, user_id: &str) -> Result<Vec<Trip>, StoreError> {
        let cursor = self.trips().find(doc! { "user": id_to_bson(user_id) }).await?;
        let trips: Vec<TripDocument> = cursor.try_collect().await?;
        Ok(trips.into_iter().map(Trip::from).collect())
    }

    async fn replace_trip(&self, trip: &Trip) -> Result<(), StoreError> {
        let result = self
            .trips()
            .replace_one(doc! { "_id": id_to_bson(&trip.id) }, TripDocument::from(trip))
            .await
            .map_err(|e| write_error(e, "shareToken"))?;
        if result.matched_count == 0 {
            return Err(StoreError::NotFound("Trip"));
        }
        Ok(())
    }

    async fn delete_trip(&self, id: &str) -> Result<bool, StoreError> {
        let result = self.trips().delete_one(doc! { "_id": id_to_bson(id) }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl CityRepository for MongoStore {
    async fn insert_city(&self, city: &City) -> Result<(), StoreError> {
        self.cities()
            .insert_one(CityDocument::from(city))
            .await
            .map_err(|e| write_error(e, "_id"))?;
        Ok(())
    }

    async fn find_city(&self, id: &str) -> Result<Option<City>, StoreError> {
        let found = self.cities().find_one(doc! { "_id": id_to_bson(id) }).await?;
        Ok(found.map(City::from))
    }

    async fn cities_by_ids(&self, ids: &[String]) -> Result<Vec<City>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self
            .cities()
            .find(doc! { "_id": { "$in": ids_to_bson(ids) } })
            .await?;
        let cities: Vec<CityDocument> = cursor.try_collect().await?;
        Ok(cities.into_iter().map(City::from).collect())
    }

    async fn search_cities(
        &self,
        query: &CityQuery,
        limit: usize,
    ) -> Result<Vec<City>, StoreError> {
        let cursor = self
            .cities()
            .find(city_filter(query))
            .sort(city_sort(query.sort_by))
            .limit(limit as i64)
            .await?;
        let cities: Vec<CityDocument> = cursor.try_collect().await?;
        Ok(cities.into_iter().map(City::from).collect())
    }
}

#[async_trait]
impl ActivityRepository for MongoStore {
    async fn insert_activity(&self, activity: &Activity) -> Result<(), StoreError> {
        self.activities()
            .insert_one(ActivityDocument::from(activity))
            .await
            .map_err(|e| write_error(e, "_id"))?;
        Ok(())
    }

    async fn find_activity(&self, id: &str) -> Result<Option<Activity>, StoreError> {
        let found = self.activities().find_one(doc! { "_id": id_to_bson(id) }).await?;
        Ok(found.map(Activity::from))
    }

    async fn activities_by_ids(&self, ids: &[String]) -> Result<Vec<Activity>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self
            .activities()
            .find(doc! { "_id": { "$in": ids_to_bson(ids) } })
            .await?;
        let activities: Vec<ActivityDocument> = cursor.try_collect().await?;
        Ok(activities.into_iter().map(Activity::from).collect())
    }

    async fn search_activities(
        &self,
        query: &ActivityQuery,
        limit: usize,
    ) -> Result<Vec<Activity>, StoreError> {
        let cursor = self
            .activities()
            .find(activity_filter(query))
            .sort(activity_sort(query.sort_by))
            .limit(limit as i64)
            .await?;
        let activities: Vec<ActivityDocument> = cursor.try_collect().await?;
        Ok(activities.into_iter().map(Activity::from).collect())
    }
}

/// Saved destinations live on the user document owned by the auth service.
/// Only the `savedDestinations` array is read or written here.
#[async_trait]
impl SavedDestinationRepository for MongoStore {
    async fn saved_destinations(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        let found = self
            .users()
            .find_one(doc! { "_id": id_to_bson(user_id) })
            .projection(doc! { "savedDestinations": 1 })
            .await?;
        Ok(found.map(|user| user.city_ids()).unwrap_or_default())
    }

    async fn add_saved_destination(&self, user_id: &str, city_id: &str) -> Result<(), StoreError> {
        self.users()
            .update_one(
                doc! { "_id": id_to_bson(user_id) },
                doc! { "$addToSet": { "savedDestinations": id_to_bson(city_id) } },
            )
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn remove_saved_destination(
        &self,
        user_id: &str,
        city_id: &str,
    ) -> Result<(), StoreError> {
        self.users()
            .update_one(
                doc! { "_id": id_to_bson(user_id) },
                doc! { "$pull": { "savedDestinations": id_to_bson(city_id) } },
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::ActivityType;
    use bson::oid::ObjectId;

    #[test]
    fn test_city_filter_escapes_search() {
        let query = CityQuery {
            search: Some("st. p".to_string()),
            ..Default::default()
        };
        let filter = city_filter(&query);
        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 2);
        let name = clauses[0].as_document().unwrap().get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), r"st\. p");
        assert_eq!(name.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_city_filter_cost_bounds() {
        let query = CityQuery {
            min_cost: Some(10.0),
            ..Default::default()
        };
        let filter = city_filter(&query);
        let bounds = filter.get_document("costIndex").unwrap();
        assert_eq!(bounds.get_f64("$gte").unwrap(), 10.0);
        assert!(bounds.get("$lte").is_none());
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(city_filter(&CityQuery::default()).is_empty());
        assert!(activity_filter(&ActivityQuery::default()).is_empty());
    }

    #[test]
    fn test_activity_filter_fields() {
        let query = ActivityQuery {
            city: Some("c1".to_string()),
            kind: Some(ActivityType::Food),
            max_duration: Some(120),
            ..Default::default()
        };
        let filter = activity_filter(&query);
        assert_eq!(filter.get_str("city").unwrap(), "c1");
        assert_eq!(filter.get_str("type").unwrap(), "food");
        assert_eq!(
            filter.get_document("duration").unwrap().get_i64("$lte").unwrap(),
            120
        );
    }

    #[test]
    fn test_sort_documents() {
        assert_eq!(city_sort(SortBy::Popularity), doc! { "popularity": -1 });
        assert_eq!(activity_sort(SortBy::Popularity), doc! { "rating": -1 });
        assert_eq!(activity_sort(SortBy::Cost), doc! { "cost": 1 });
    }

    #[test]
    fn test_activity_filter_matches_city_object_id() {
        let city = ObjectId::new();
        let query = ActivityQuery {
            city: Some(city.to_hex()),
            ..Default::default()
        };
        assert_eq!(activity_filter(&query).get_object_id("city").unwrap(), city);
    }
}
