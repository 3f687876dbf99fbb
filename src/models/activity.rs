use serde::{Deserialize, Serialize};

use crate::error::ApiError;

use super::{city::CitySummary, new_id, required_trimmed};

const MIN_DURATION_MINUTES: u32 = 15;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Sightseeing,
    Food,
    Adventure,
    Culture,
    Nightlife,
    Shopping,
    Nature,
    Other,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Sightseeing => "sightseeing",
            ActivityType::Food => "food",
            ActivityType::Adventure => "adventure",
            ActivityType::Culture => "culture",
            ActivityType::Nightlife => "nightlife",
            ActivityType::Shopping => "shopping",
            ActivityType::Nature => "nature",
            ActivityType::Other => "other",
        }
    }
}

fn default_duration() -> u32 {
    60
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Activity {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub city: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: f64,
    /// Minutes.
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub address: String,
}

/// Activity as returned by the catalog, with its city reference resolved.
#[derive(Debug, Serialize, Clone)]
pub struct ActivityListing {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub city: Option<CitySummary>,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub description: String,
    pub cost: f64,
    pub duration: u32,
    pub image: String,
    pub rating: f64,
    pub address: String,
}

impl ActivityListing {
    pub fn new(activity: Activity, city: Option<CitySummary>) -> Self {
        Self {
            id: activity.id,
            name: activity.name,
            city,
            kind: activity.kind,
            description: activity.description,
            cost: activity.cost,
            duration: activity.duration,
            image: activity.image,
            rating: activity.rating,
            address: activity.address,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewActivity {
    pub name: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ActivityType>,
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

impl NewActivity {
    pub fn into_activity(self) -> Result<Activity, ApiError> {
        let name = required_trimmed(self.name, "name")?;
        let city = required_trimmed(self.city, "city")?;
        let kind = self
            .kind
            .ok_or_else(|| ApiError::validation("Please provide type"))?;

        if self.cost < 0.0 {
            return Err(ApiError::validation("cost must not be negative"));
        }
        if self.duration < MIN_DURATION_MINUTES {
            return Err(ApiError::validation(format!(
                "duration must be at least {} minutes",
                MIN_DURATION_MINUTES
            )));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(ApiError::validation("rating must be between 0 and 5"));
        }

        Ok(Activity {
            id: new_id(),
            name,
            city,
            kind,
            description: self.description,
            cost: self.cost,
            duration: self.duration,
            image: self.image,
            rating: self.rating,
            address: self.address,
        })
    }
}
