use serde::{Deserialize, Serialize};

use crate::error::ApiError;

use super::{new_id, required_trimmed};

fn default_cost_index() -> f64 {
    50.0
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(rename = "_id")]
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

/// The slice of a city embedded into activity listings.
#[derive(Debug, Serialize, Clone)]
pub struct CitySummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub country: String,
}

impl From<&City> for CitySummary {
    fn from(city: &City) -> Self {
        Self {
            id: city.id.clone(),
            name: city.name.clone(),
            country: city.country.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCity {
    pub name: Option<String>,
    pub country: Option<String>,
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
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub timezone: String,
}

impl NewCity {
    pub fn into_city(self) -> Result<City, ApiError> {
        let name = required_trimmed(self.name, "name")?;
        let country = required_trimmed(self.country, "country")?;

        if !(0.0..=100.0).contains(&self.cost_index) {
            return Err(ApiError::validation("costIndex must be between 0 and 100"));
        }

        Ok(City {
            id: new_id(),
            name,
            country,
            region: self.region.trim().to_string(),
            cost_index: self.cost_index,
            popularity: self.popularity,
            description: self.description,
            image: self.image,
            coordinates: self.coordinates,
            timezone: self.timezone,
        })
    }
}
