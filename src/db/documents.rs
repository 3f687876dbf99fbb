use bson::{oid::ObjectId, Bson, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{
    activity::{Activity, ActivityType},
    city::{City, Coordinates},
    trip::{Accommodation, ActivityBooking, Budget, Stop, Transport, Trip},
};

/// Ids created here are ObjectId hex and go to MongoDB as ObjectIds. Anything
/// else, such as a user id from another identity provider, stays a string.
pub fn id_to_bson(id: &str) -> Bson {
    match ObjectId::parse_str(id) {
        Ok(oid) => Bson::ObjectId(oid),
        Err(_) => Bson::String(id.to_string()),
    }
}

pub fn ids_to_bson(ids: &[String]) -> Vec<Bson> {
    ids.iter().map(|id| id_to_bson(id)).collect()
}

pub fn bson_to_id(value: &Bson) -> Option<String> {
    match value {
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        Bson::String(s) => Some(s.clone()),
        _ => None,
    }
}

mod object_id {
    use bson::Bson;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
        super::id_to_bson(id).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let value = Bson::deserialize(deserializer)?;
        super::bson_to_id(&value).ok_or_else(|| {
            de::Error::custom(format!(
                "expected ObjectId or string, found {:?}",
                value.element_type()
            ))
        })
    }
}

mod optional_object_id {
    use bson::Bson;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(id: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        id.as_deref().map(super::id_to_bson).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let value = Option::<Bson>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(super::bson_to_id))
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDocument {
    #[serde(rename = "_id", with = "object_id")]
    pub id: String,
    #[serde(with = "object_id")]
    pub user: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: BsonDateTime,
    pub end_date: BsonDateTime,
    #[serde(default)]
    pub cover_photo: String,
    #[serde(default)]
    pub stops: Vec<StopDocument>,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_token: Option<String>,
    #[serde(default = "BsonDateTime::now")]
    pub created_at: BsonDateTime,
    #[serde(default = "BsonDateTime::now")]
    pub updated_at: BsonDateTime,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDocument {
    #[serde(rename = "_id", with = "object_id")]
    pub id: String,
    #[serde(with = "object_id")]
    pub city: String,
    pub arrival_date: BsonDateTime,
    pub departure_date: BsonDateTime,
    pub order: i64,
    #[serde(default)]
    pub activities: Vec<BookingDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<Accommodation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<Transport>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingDocument {
    #[serde(rename = "_id", with = "object_id")]
    pub id: String,
    /// Optional in older documents.
    #[serde(default, with = "optional_object_id")]
    pub activity: Option<String>,
    pub date: BsonDateTime,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDocument {
    #[serde(rename = "_id", with = "object_id")]
    pub id: String,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub region: String,
    #[serde(default = "default_cost_index")]
    pub cost_index: f64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub timezone: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityDocument {
    #[serde(rename = "_id", with = "object_id")]
    pub id: String,
    pub name: String,
    #[serde(with = "object_id")]
    pub city: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub address: String,
}

/// The slice of a user document this service touches.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SavedDestinationsDocument {
    #[serde(default)]
    pub saved_destinations: Vec<Bson>,
}

fn default_cost_index() -> f64 {
    50.0
}

fn default_duration() -> u32 {
    60
}

impl From<&Trip> for TripDocument {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id.clone(),
            user: trip.user.clone(),
            name: trip.name.clone(),
            description: trip.description.clone(),
            start_date: BsonDateTime::from_chrono(trip.start_date),
            end_date: BsonDateTime::from_chrono(trip.end_date),
            cover_photo: trip.cover_photo.clone(),
            stops: trip.stops.iter().map(StopDocument::from).collect(),
            budget: trip.budget.clone(),
            is_public: trip.is_public,
            share_token: trip.share_token.clone(),
            created_at: BsonDateTime::from_chrono(trip.created_at),
            updated_at: BsonDateTime::from_chrono(trip.updated_at),
        }
    }
}

impl From<TripDocument> for Trip {
    fn from(doc: TripDocument) -> Self {
        Self {
            id: doc.id,
            user: doc.user,
            name: doc.name,
            description: doc.description,
            start_date: doc.start_date.to_chrono(),
            end_date: doc.end_date.to_chrono(),
            cover_photo: doc.cover_photo,
            stops: doc.stops.into_iter().map(Stop::from).collect(),
            budget: doc.budget,
            is_public: doc.is_public,
            share_token: doc.share_token,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        }
    }
}

impl From<&Stop> for StopDocument {
    fn from(stop: &Stop) -> Self {
        Self {
            id: stop.id.clone(),
            city: stop.city.clone(),
            arrival_date: BsonDateTime::from_chrono(stop.arrival_date),
            departure_date: BsonDateTime::from_chrono(stop.departure_date),
            order: stop.order,
            activities: stop.activities.iter().map(BookingDocument::from).collect(),
            accommodation: stop.accommodation.clone(),
            transport: stop.transport.clone(),
        }
    }
}

impl From<StopDocument> for Stop {
    fn from(doc: StopDocument) -> Self {
        Self {
            id: doc.id,
            city: doc.city,
            arrival_date: doc.arrival_date.to_chrono(),
            departure_date: doc.departure_date.to_chrono(),
            order: doc.order,
            activities: doc.activities.into_iter().map(ActivityBooking::from).collect(),
            accommodation: doc.accommodation,
            transport: doc.transport,
        }
    }
}

impl From<&ActivityBooking> for BookingDocument {
    fn from(booking: &ActivityBooking) -> Self {
        Self {
            id: booking.id.clone(),
            activity: Some(booking.activity.clone()).filter(|id| !id.is_empty()),
            date: BsonDateTime::from_chrono(booking.date),
            time: booking.time.clone(),
            cost: booking.cost,
            notes: booking.notes.clone(),
        }
    }
}

impl From<BookingDocument> for ActivityBooking {
    fn from(doc: BookingDocument) -> Self {
        Self {
            id: doc.id,
            activity: doc.activity.unwrap_or_default(),
            date: doc.date.to_chrono(),
            time: doc.time,
            cost: doc.cost,
            notes: doc.notes,
        }
    }
}

impl From<&City> for CityDocument {
    fn from(city: &City) -> Self {
        Self {
            id: city.id.clone(),
            name: city.name.clone(),
            country: city.country.clone(),
            region: city.region.clone(),
            cost_index: city.cost_index,
            popularity: city.popularity,
            description: city.description.clone(),
            image: city.image.clone(),
            coordinates: city.coordinates.clone(),
            timezone: city.timezone.clone(),
        }
    }
}

impl From<CityDocument> for City {
    fn from(doc: CityDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            country: doc.country,
            region: doc.region,
            cost_index: doc.cost_index,
            popularity: doc.popularity,
            description: doc.description,
            image: doc.image,
            coordinates: doc.coordinates,
            timezone: doc.timezone,
        }
    }
}

impl From<&Activity> for ActivityDocument {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id.clone(),
            name: activity.name.clone(),
            city: activity.city.clone(),
            kind: activity.kind,
            description: activity.description.clone(),
            cost: activity.cost,
            duration: activity.duration,
            image: activity.image.clone(),
            rating: activity.rating,
            address: activity.address.clone(),
        }
    }
}

impl From<ActivityDocument> for Activity {
    fn from(doc: ActivityDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            city: doc.city,
            kind: doc.kind,
            description: doc.description,
            cost: doc.cost,
            duration: doc.duration,
            image: doc.image,
            rating: doc.rating,
            address: doc.address,
        }
    }
}

impl SavedDestinationsDocument {
    pub fn city_ids(&self) -> Vec<String> {
        self.saved_destinations.iter().filter_map(bson_to_id).collect()
    }
}
