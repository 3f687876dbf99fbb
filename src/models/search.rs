use std::cmp::Ordering;

use serde::Deserialize;

use super::{
    activity::{Activity, ActivityType},
    city::City,
};

/// Hard cap on catalog result sets. There is no cursor; callers narrow filters instead.
pub const MAX_RESULTS: usize = 100;
pub const POPULAR_CITY_LIMIT: usize = 10;

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// City popularity, or activity rating, highest first.
    #[default]
    Popularity,
    Cost,
    Name,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CityQuery {
    pub search: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub min_cost: Option<f64>,
    pub max_cost: Option<f64>,
    #[serde(default)]
    pub sort_by: SortBy,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivityQuery {
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ActivityType>,
    pub min_cost: Option<f64>,
    pub max_cost: Option<f64>,
    pub min_duration: Option<u32>,
    pub max_duration: Option<u32>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: SortBy,
}

/// Treats empty query-string values as absent.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn in_range<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

impl CityQuery {
    pub fn matches(&self, city: &City) -> bool {
        if let Some(search) = non_empty(&self.search) {
            if !contains_ignore_case(&city.name, search)
                && !contains_ignore_case(&city.country, search)
            {
                return false;
            }
        }
        if let Some(country) = non_empty(&self.country) {
            if !contains_ignore_case(&city.country, country) {
                return false;
            }
        }
        if let Some(region) = non_empty(&self.region) {
            if !contains_ignore_case(&city.region, region) {
                return false;
            }
        }
        in_range(city.cost_index, self.min_cost, self.max_cost)
    }
}

impl ActivityQuery {
    pub fn matches(&self, activity: &Activity) -> bool {
        if let Some(city) = non_empty(&self.city) {
            if activity.city != city {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if activity.kind != kind {
                return false;
            }
        }
        if let Some(search) = non_empty(&self.search) {
            if !contains_ignore_case(&activity.name, search) {
                return false;
            }
        }
        in_range(activity.cost, self.min_cost, self.max_cost)
            && in_range(activity.duration, self.min_duration, self.max_duration)
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn ascending(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

impl SortBy {
    pub fn compare_cities(&self, a: &City, b: &City) -> Ordering {
        match self {
            SortBy::Popularity => descending(a.popularity, b.popularity),
            SortBy::Cost => ascending(a.cost_index, b.cost_index),
            SortBy::Name => a.name.cmp(&b.name),
        }
    }

    pub fn compare_activities(&self, a: &Activity, b: &Activity) -> Ordering {
        match self {
            SortBy::Popularity => descending(a.rating, b.rating),
            SortBy::Cost => ascending(a.cost, b.cost),
            SortBy::Name => a.name.cmp(&b.name),
        }
    }
}
