use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::datetime::deserialize_optional_datetime;

use super::{Accommodation, Transport};

/// Validated input for a new trip.
#[derive(Debug)]
pub struct NewTrip {
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub cover_photo: String,
}

#[derive(Debug)]
pub struct NewStop {
    pub city: String,
    pub arrival_date: DateTime<Utc>,
    pub departure_date: DateTime<Utc>,
    pub order: Option<i64>,
}

#[derive(Debug)]
pub struct NewBooking {
    pub activity: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub cost: f64,
    pub notes: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub end_date: Option<DateTime<Utc>>,
    pub cover_photo: Option<String>,
}

impl CreateTripRequest {
    pub fn validate(self) -> Result<NewTrip, ApiError> {
        let name = self.name.map(|n| n.trim().to_string()).unwrap_or_default();
        match (name.is_empty(), self.start_date, self.end_date) {
            (false, Some(start_date), Some(end_date)) => Ok(NewTrip {
                name,
                description: self.description.unwrap_or_default(),
                start_date,
                end_date,
                cover_photo: self.cover_photo.unwrap_or_default(),
            }),
            _ => Err(ApiError::validation(
                "Please provide name, startDate, and endDate",
            )),
        }
    }
}

/// Trip-level fields a caller may change. Stops, budget and sharing have their
/// own operations.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTripRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub end_date: Option<DateTime<Utc>>,
    pub cover_photo: Option<String>,
    pub is_public: Option<bool>,
}

impl UpdateTripRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        match &self.name {
            Some(name) if name.trim().is_empty() => {
                Err(ApiError::validation("Please provide a trip name"))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStopRequest {
    pub city: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub arrival_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub departure_date: Option<DateTime<Utc>>,
    pub order: Option<i64>,
}

impl AddStopRequest {
    pub fn validate(self) -> Result<NewStop, ApiError> {
        let city = self.city.filter(|c| !c.trim().is_empty());
        match (city, self.arrival_date, self.departure_date) {
            (Some(city), Some(arrival_date), Some(departure_date)) => {
                if departure_date < arrival_date {
                    return Err(ApiError::validation(
                        "departureDate must not be before arrivalDate",
                    ));
                }
                Ok(NewStop {
                    city,
                    arrival_date,
                    departure_date,
                    order: self.order,
                })
            }
            _ => Err(ApiError::validation(
                "Please provide city, arrivalDate, and departureDate",
            )),
        }
    }
}

/// Each present field replaces the stored value wholesale. For the nested
/// groups, an explicit `null` clears the value and an absent key keeps it.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStopRequest {
    pub city: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub arrival_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub departure_date: Option<DateTime<Utc>>,
    pub order: Option<i64>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub accommodation: Option<Option<Accommodation>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub transport: Option<Option<Transport>>,
}

impl UpdateStopRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if matches!(&self.city, Some(city) if city.trim().is_empty()) {
            return Err(ApiError::validation("city must not be empty"));
        }
        if let Some(Some(accommodation)) = &self.accommodation {
            ensure_non_negative(accommodation.cost, "accommodation.cost")?;
        }
        if let Some(Some(transport)) = &self.transport {
            ensure_non_negative(transport.cost, "transport.cost")?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct AddBookingRequest {
    pub activity: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub date: Option<DateTime<Utc>>,
    pub time: Option<String>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

impl AddBookingRequest {
    pub fn validate(self) -> Result<NewBooking, ApiError> {
        let activity = self.activity.filter(|a| !a.trim().is_empty());
        match (activity, self.date) {
            (Some(activity), Some(date)) => {
                let cost = self.cost.unwrap_or(0.0);
                ensure_non_negative(cost, "cost")?;
                Ok(NewBooking {
                    activity,
                    date,
                    time: self.time.unwrap_or_default(),
                    cost,
                    notes: self.notes.unwrap_or_default(),
                })
            }
            _ => Err(ApiError::validation("Please provide activity and date")),
        }
    }
}

fn ensure_non_negative(value: f64, field: &str) -> Result<(), ApiError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ApiError::validation(format!("{} must not be negative", field)))
    }
}
