use serde::Serialize;

use crate::models::trip::{Budget, Stop, Trip};

/// Flat per-day meal estimate.
pub const MEAL_COST_PER_DAY: f64 = 30.0;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    #[serde(flatten)]
    pub budget: Budget,
    pub avg_cost_per_day: f64,
    pub days: i64,
}

pub struct BudgetService;

impl BudgetService {
    /// Days billed for meals at a stop. A same-day stop counts as one day; a
    /// reversed range contributes nothing.
    pub fn meal_days(stop: &Stop) -> i64 {
        let days = stop.stay_days();
        if days < 0 {
            0
        } else {
            days.max(1)
        }
    }

    pub fn calculate_transport_cost(stops: &[Stop]) -> f64 {
        stops
            .iter()
            .filter_map(|stop| stop.transport.as_ref())
            .map(|transport| transport.cost)
            .sum()
    }

    pub fn calculate_accommodation_cost(stops: &[Stop]) -> f64 {
        stops
            .iter()
            .filter_map(|stop| stop.accommodation.as_ref())
            .map(|accommodation| accommodation.cost)
            .sum()
    }

    pub fn calculate_activity_cost(stops: &[Stop]) -> f64 {
        stops
            .iter()
            .flat_map(|stop| stop.activities.iter())
            .map(|booking| booking.cost)
            .sum()
    }

    pub fn calculate_meal_cost(stops: &[Stop]) -> f64 {
        stops
            .iter()
            .map(|stop| Self::meal_days(stop) as f64 * MEAL_COST_PER_DAY)
            .sum()
    }

    /// Derives the whole budget from the current stops. Replaces, never adjusts.
    pub fn calculate(stops: &[Stop]) -> Budget {
        let transport = Self::calculate_transport_cost(stops);
        let accommodation = Self::calculate_accommodation_cost(stops);
        let activities = Self::calculate_activity_cost(stops);
        let meals = Self::calculate_meal_cost(stops);

        Budget {
            total: transport + accommodation + activities + meals,
            transport,
            accommodation,
            activities,
            meals,
        }
    }

    /// Recomputes the stored snapshot. Returns whether it changed.
    pub fn refresh(trip: &mut Trip) -> bool {
        let budget = Self::calculate(&trip.stops);
        let changed = budget != trip.budget;
        trip.budget = budget;
        changed
    }

    pub fn summarize(trip: &Trip) -> BudgetSummary {
        let days = trip.length_days();
        let avg_cost_per_day = if days > 0 {
            round_cents(trip.budget.total / days as f64)
        } else {
            0.0
        };

        BudgetSummary {
            budget: trip.budget.clone(),
            avg_cost_per_day,
            days,
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
