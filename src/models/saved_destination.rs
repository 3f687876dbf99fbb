use serde::{Deserialize, Serialize};

use crate::error::ApiError;

use super::{city::City, required_trimmed};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDestinationRequest {
    pub city_id: Option<String>,
}

impl SaveDestinationRequest {
    pub fn validate(self) -> Result<String, ApiError> {
        required_trimmed(self.city_id, "cityId")
    }
}

/// A saved city as listed back to its user.
#[derive(Debug, Serialize, Clone)]
pub struct SavedDestination {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub country: String,
    pub image: String,
}

impl From<City> for SavedDestination {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            country: city.country,
            image: city.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_city_id_is_required() {
        let empty: SaveDestinationRequest = serde_json::from_value(json!({})).unwrap();
        let blank: SaveDestinationRequest = serde_json::from_value(json!({"cityId": " "})).unwrap();
        for request in [empty, blank] {
            match request.validate() {
                Err(ApiError::Validation(message)) => assert_eq!(message, "Please provide cityId"),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }
}
