pub mod populated;
pub mod requests;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

use super::{datetime::days_between, new_id};
use requests::{NewBooking, NewStop, NewTrip, UpdateStopRequest, UpdateTripRequest};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationType {
    Hotel,
    Hostel,
    Airbnb,
    Other,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    Flight,
    Train,
    Bus,
    Car,
    Other,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Accommodation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub cost: f64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AccommodationType>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Transport {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransportType>,
    #[serde(default)]
    pub cost: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ActivityBooking {
    #[serde(rename = "_id")]
    pub id: String,
    pub activity: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    #[serde(rename = "_id")]
    pub id: String,
    pub city: String,
    pub arrival_date: DateTime<Utc>,
    pub departure_date: DateTime<Utc>,
    /// Sort key only. Gaps are expected once stops are removed.
    pub order: i64,
    #[serde(default)]
    pub activities: Vec<ActivityBooking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<Accommodation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<Transport>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Budget {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub transport: f64,
    #[serde(default)]
    pub accommodation: f64,
    #[serde(default)]
    pub activities: f64,
    #[serde(default)]
    pub meals: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub cover_photo: String,
    #[serde(default)]
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    pub fn new(user_id: &str, input: NewTrip) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            user: user_id.to_string(),
            name: input.name,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            cover_photo: input.cover_photo,
            stops: Vec::new(),
            budget: Budget::default(),
            is_public: false,
            share_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user == user_id
    }

    /// Whole days spanned by the trip, rounded up.
    pub fn length_days(&self) -> i64 {
        days_between(&self.start_date, &self.end_date)
    }

    pub fn apply_update(&mut self, update: UpdateTripRequest) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        if let Some(cover_photo) = update.cover_photo {
            self.cover_photo = cover_photo;
        }
        if let Some(is_public) = update.is_public {
            self.is_public = is_public;
        }
    }

    /// `max(order) + 1`, or 0 for an empty itinerary.
    pub fn next_order(&self) -> i64 {
        self.stops
            .iter()
            .map(|stop| stop.order)
            .max()
            .map_or(0, |max| max + 1)
    }

    pub fn add_stop(&mut self, input: NewStop) -> &Stop {
        let order = input.order.unwrap_or_else(|| self.next_order());
        self.stops.push(Stop {
            id: new_id(),
            city: input.city,
            arrival_date: input.arrival_date,
            departure_date: input.departure_date,
            order,
            activities: Vec::new(),
            accommodation: None,
            transport: None,
        });
        &self.stops[self.stops.len() - 1]
    }

    pub fn stop_mut(&mut self, stop_id: &str) -> Option<&mut Stop> {
        self.stops.iter_mut().find(|stop| stop.id == stop_id)
    }

    /// Removes the stop with its bookings. Sibling `order` values are left alone.
    pub fn remove_stop(&mut self, stop_id: &str) -> Option<Stop> {
        let index = self.stops.iter().position(|stop| stop.id == stop_id)?;
        Some(self.stops.remove(index))
    }

    pub fn referenced_city_ids(&self) -> HashSet<String> {
        self.stops.iter().map(|stop| stop.city.clone()).collect()
    }

    pub fn referenced_activity_ids(&self) -> HashSet<String> {
        self.stops
            .iter()
            .flat_map(|stop| stop.activities.iter())
            .map(|booking| booking.activity.clone())
            .collect()
    }
}

impl Stop {
    /// Signed day count between arrival and departure, rounded up.
    pub fn stay_days(&self) -> i64 {
        days_between(&self.arrival_date, &self.departure_date)
    }

    /// Overwrites each field group present in `update`. The resulting date range
    /// is checked before anything is written.
    pub fn apply_update(&mut self, update: UpdateStopRequest) -> Result<(), ApiError> {
        let arrival = update.arrival_date.unwrap_or(self.arrival_date);
        let departure = update.departure_date.unwrap_or(self.departure_date);
        if departure < arrival {
            return Err(ApiError::validation(
                "departureDate must not be before arrivalDate",
            ));
        }

        if let Some(city) = update.city {
            self.city = city;
        }
        self.arrival_date = arrival;
        self.departure_date = departure;
        if let Some(order) = update.order {
            self.order = order;
        }
        if let Some(accommodation) = update.accommodation {
            self.accommodation = accommodation;
        }
        if let Some(transport) = update.transport {
            self.transport = transport;
        }
        Ok(())
    }

    pub fn add_booking(&mut self, input: NewBooking) -> &ActivityBooking {
        self.activities.push(ActivityBooking {
            id: new_id(),
            activity: input.activity,
            date: input.date,
            time: input.time,
            cost: input.cost,
            notes: input.notes,
        });
        &self.activities[self.activities.len() - 1]
    }

    pub fn remove_booking(&mut self, booking_id: &str) -> Option<ActivityBooking> {
        let index = self
            .activities
            .iter()
            .position(|booking| booking.id == booking_id)?;
        Some(self.activities.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::datetime::parse_datetime;

    fn date(raw: &str) -> DateTime<Utc> {
        parse_datetime(raw).unwrap()
    }

    fn trip() -> Trip {
        Trip::new(
            "user-1",
            NewTrip {
                name: "Euro Trip".to_string(),
                description: String::new(),
                start_date: date("2025-06-01"),
                end_date: date("2025-06-10"),
                cover_photo: String::new(),
            },
        )
    }

    fn stop_with_order(order: Option<i64>) -> NewStop {
        NewStop {
            city: "paris".to_string(),
            arrival_date: date("2025-06-01"),
            departure_date: date("2025-06-04"),
            order,
        }
    }

    #[test]
    fn test_first_stop_gets_order_zero() {
        let mut trip = trip();
        assert_eq!(trip.add_stop(stop_with_order(None)).order, 0);
    }

    #[test]
    fn test_next_order_follows_max_not_count() {
        let mut trip = trip();
        for order in [0, 2, 5] {
            trip.add_stop(stop_with_order(Some(order)));
        }
        assert_eq!(trip.add_stop(stop_with_order(None)).order, 6);
    }

    #[test]
    fn test_remove_stop_keeps_gaps() {
        let mut trip = trip();
        for order in [0, 2, 5] {
            trip.add_stop(stop_with_order(Some(order)));
        }
        let middle = trip.stops[1].id.clone();
        assert!(trip.remove_stop(&middle).is_some());

        let orders: Vec<i64> = trip.stops.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 5]);
        assert!(trip.remove_stop(&middle).is_none());
    }

    #[test]
    fn test_stop_update_keeps_untouched_groups() {
        let mut trip = trip();
        let stop_id = trip.add_stop(stop_with_order(None)).id.clone();
        let stop = trip.stop_mut(&stop_id).unwrap();
        stop.accommodation = Some(Accommodation {
            name: Some("Hotel du Nord".to_string()),
            cost: 300.0,
            kind: Some(AccommodationType::Hotel),
        });

        let update: UpdateStopRequest =
            serde_json::from_value(serde_json::json!({ "order": 3 })).unwrap();
        stop.apply_update(update).unwrap();

        assert_eq!(stop.order, 3);
        assert_eq!(stop.accommodation.as_ref().map(|a| a.cost), Some(300.0));
    }

    #[test]
    fn test_stop_update_null_clears_accommodation() {
        let mut trip = trip();
        let stop_id = trip.add_stop(stop_with_order(None)).id.clone();
        let stop = trip.stop_mut(&stop_id).unwrap();
        stop.accommodation = Some(Accommodation {
            name: None,
            cost: 120.0,
            kind: None,
        });

        let update: UpdateStopRequest =
            serde_json::from_value(serde_json::json!({ "accommodation": null })).unwrap();
        stop.apply_update(update).unwrap();
        assert!(stop.accommodation.is_none());
    }

    #[test]
    fn test_stop_update_rejects_inverted_dates() {
        let mut trip = trip();
        let stop_id = trip.add_stop(stop_with_order(None)).id.clone();
        let stop = trip.stop_mut(&stop_id).unwrap();

        let update: UpdateStopRequest =
            serde_json::from_value(serde_json::json!({ "departureDate": "2025-05-30" })).unwrap();
        assert!(matches!(stop.apply_update(update), Err(ApiError::Validation(_))));
        assert_eq!(stop.departure_date, date("2025-06-04"));
    }

    #[test]
    fn test_booking_add_and_remove() {
        let mut trip = trip();
        let stop_id = trip.add_stop(stop_with_order(None)).id.clone();
        let stop = trip.stop_mut(&stop_id).unwrap();
        let booking_id = stop
            .add_booking(NewBooking {
                activity: "louvre".to_string(),
                date: date("2025-06-02"),
                time: String::new(),
                cost: 25.0,
                notes: String::new(),
            })
            .id
            .clone();

        assert_eq!(stop.activities.len(), 1);
        assert_eq!(stop.remove_booking(&booking_id).map(|b| b.cost), Some(25.0));
        assert!(stop.activities.is_empty());
    }

    #[test]
    fn test_trip_serializes_camel_case_without_token() {
        let value = serde_json::to_value(trip()).unwrap();
        assert_eq!(value["isPublic"], false);
        assert!(value.get("shareToken").is_none());
        assert!(value.get("startDate").is_some());
        assert_eq!(value["budget"]["total"], 0.0);
    }
}
