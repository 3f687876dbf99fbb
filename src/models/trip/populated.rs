use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{activity::Activity, city::City};

use super::{Accommodation, ActivityBooking, Budget, Stop, Transport, Trip};

/// A booking with its catalog activity resolved. `activity` is `null` when the
/// referenced activity no longer exists.
#[derive(Debug, Serialize, Clone)]
pub struct PopulatedBooking {
    #[serde(rename = "_id")]
    pub id: String,
    pub activity: Option<Activity>,
    pub date: DateTime<Utc>,
    pub time: String,
    pub cost: f64,
    pub notes: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedStop {
    #[serde(rename = "_id")]
    pub id: String,
    pub city: Option<City>,
    pub arrival_date: DateTime<Utc>,
    pub departure_date: DateTime<Utc>,
    pub order: i64,
    pub activities: Vec<PopulatedBooking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<Accommodation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<Transport>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedTrip {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub cover_photo: String,
    pub stops: Vec<PopulatedStop>,
    pub budget: Budget,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PopulatedTrip {
    pub fn from_trip(
        trip: Trip,
        cities: &HashMap<String, City>,
        activities: &HashMap<String, Activity>,
    ) -> Self {
        // Stored order is insertion order; clients get itinerary order.
        let mut stops: Vec<PopulatedStop> = trip
            .stops
            .into_iter()
            .map(|stop| populate_stop(stop, cities, activities))
            .collect();
        stops.sort_by_key(|stop| stop.order);

        Self {
            id: trip.id,
            user: trip.user,
            name: trip.name,
            description: trip.description,
            start_date: trip.start_date,
            end_date: trip.end_date,
            cover_photo: trip.cover_photo,
            stops,
            budget: trip.budget,
            is_public: trip.is_public,
            share_token: trip.share_token,
            created_at: trip.created_at,
            updated_at: trip.updated_at,
        }
    }
}

fn populate_stop(
    stop: Stop,
    cities: &HashMap<String, City>,
    activities: &HashMap<String, Activity>,
) -> PopulatedStop {
    PopulatedStop {
        city: cities.get(&stop.city).cloned(),
        activities: stop
            .activities
            .into_iter()
            .map(|booking| populate_booking(booking, activities))
            .collect(),
        id: stop.id,
        arrival_date: stop.arrival_date,
        departure_date: stop.departure_date,
        order: stop.order,
        accommodation: stop.accommodation,
        transport: stop.transport,
    }
}

fn populate_booking(
    booking: ActivityBooking,
    activities: &HashMap<String, Activity>,
) -> PopulatedBooking {
    PopulatedBooking {
        activity: activities.get(&booking.activity).cloned(),
        id: booking.id,
        date: booking.date,
        time: booking.time,
        cost: booking.cost,
        notes: booking.notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        datetime::parse_datetime,
        trip::requests::{NewStop, NewTrip},
    };

    fn paris() -> City {
        serde_json::from_value(serde_json::json!({
            "_id": "paris",
            "name": "Paris",
            "country": "France"
        }))
        .unwrap()
    }

    #[test]
    fn test_stops_come_back_in_order_with_missing_cities_as_null() {
        let mut trip = Trip::new(
            "user-1",
            NewTrip {
                name: "Loop".to_string(),
                description: String::new(),
                start_date: parse_datetime("2025-06-01").unwrap(),
                end_date: parse_datetime("2025-06-10").unwrap(),
                cover_photo: String::new(),
            },
        );
        for (city, order) in [("gone", 4), ("paris", 1)] {
            trip.add_stop(NewStop {
                city: city.to_string(),
                arrival_date: parse_datetime("2025-06-01").unwrap(),
                departure_date: parse_datetime("2025-06-02").unwrap(),
                order: Some(order),
            });
        }

        let cities = HashMap::from([("paris".to_string(), paris())]);
        let populated = PopulatedTrip::from_trip(trip, &cities, &HashMap::new());

        assert_eq!(populated.stops[0].order, 1);
        assert_eq!(populated.stops[0].city.as_ref().map(|c| c.name.as_str()), Some("Paris"));
        assert!(populated.stops[1].city.is_none());

        let json = serde_json::to_value(&populated).unwrap();
        assert!(json["stops"][1]["city"].is_null());
    }
}
