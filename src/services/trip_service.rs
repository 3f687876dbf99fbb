use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;

use crate::{
    db::Store,
    error::ApiError,
    models::{
        activity::Activity,
        city::City,
        trip::{
            populated::PopulatedTrip,
            requests::{
                AddBookingRequest, AddStopRequest, CreateTripRequest, UpdateStopRequest,
                UpdateTripRequest,
            },
            Trip,
        },
    },
};

use super::{
    access_control::{ensure_owner, ensure_readable},
    budget_service::{BudgetService, BudgetSummary},
    share_service::{generate_share_token, share_url, SharedLink},
};

type References = (HashMap<String, City>, HashMap<String, Activity>);

/// Owner-scoped operations on the trip aggregate. Every mutation rebuilds the
/// budget and writes the trip back in a single replace.
pub struct TripService {
    store: Arc<dyn Store>,
}

impl TripService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn load(&self, trip_id: &str) -> Result<Trip, ApiError> {
        self.store
            .find_trip(trip_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Trip not found"))
    }

    async fn load_owned(&self, trip_id: &str, user_id: &str) -> Result<Trip, ApiError> {
        let trip = self.load(trip_id).await?;
        ensure_owner(&trip, user_id)?;
        Ok(trip)
    }

    async fn persist(&self, trip: &mut Trip) -> Result<(), ApiError> {
        trip.updated_at = Utc::now();
        self.store.replace_trip(trip).await?;
        Ok(())
    }

    async fn commit(&self, mut trip: Trip) -> Result<PopulatedTrip, ApiError> {
        BudgetService::refresh(&mut trip);
        self.persist(&mut trip).await?;
        self.populate(trip).await
    }

    async fn ensure_city_exists(&self, city_id: &str) -> Result<(), ApiError> {
        match self.store.find_city(city_id).await? {
            Some(_) => Ok(()),
            None => Err(ApiError::not_found("City not found")),
        }
    }

    /// Loads every city and activity the trips point at, one query per collection.
    async fn references(&self, trips: &[Trip]) -> Result<References, ApiError> {
        let city_ids: HashSet<String> =
            trips.iter().flat_map(Trip::referenced_city_ids).collect();
        let activity_ids: HashSet<String> =
            trips.iter().flat_map(Trip::referenced_activity_ids).collect();
        let city_ids: Vec<String> = city_ids.into_iter().collect();
        let activity_ids: Vec<String> = activity_ids.into_iter().collect();

        let cities = self
            .store
            .cities_by_ids(&city_ids)
            .await?
            .into_iter()
            .map(|city| (city.id.clone(), city))
            .collect();
        let activities = self
            .store
            .activities_by_ids(&activity_ids)
            .await?
            .into_iter()
            .map(|activity| (activity.id.clone(), activity))
            .collect();
        Ok((cities, activities))
    }

    /// Resolves city and activity references. Dangling references come back as `null`.
    pub async fn populate(&self, trip: Trip) -> Result<PopulatedTrip, ApiError> {
        let (cities, activities) = self.references(std::slice::from_ref(&trip)).await?;
        Ok(PopulatedTrip::from_trip(trip, &cities, &activities))
    }

    /// The caller's trips, newest first.
    pub async fn list(&self, user_id: &str) -> Result<Vec<PopulatedTrip>, ApiError> {
        let mut trips = self.store.trips_for_user(user_id).await?;
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let (cities, activities) = self.references(&trips).await?;
        Ok(trips
            .into_iter()
            .map(|trip| PopulatedTrip::from_trip(trip, &cities, &activities))
            .collect())
    }

    pub async fn create(
        &self,
        user_id: &str,
        input: CreateTripRequest,
    ) -> Result<PopulatedTrip, ApiError> {
        let trip = Trip::new(user_id, input.validate()?);
        self.store.insert_trip(&trip).await?;
        log::info!("User {} created trip {}", user_id, trip.id);
        self.populate(trip).await
    }

    pub async fn get(&self, trip_id: &str, user_id: &str) -> Result<PopulatedTrip, ApiError> {
        let trip = self.load(trip_id).await?;
        ensure_readable(&trip, user_id)?;
        self.populate(trip).await
    }

    pub async fn update(
        &self,
        trip_id: &str,
        user_id: &str,
        input: UpdateTripRequest,
    ) -> Result<PopulatedTrip, ApiError> {
        let mut trip = self.load_owned(trip_id, user_id).await?;
        input.validate()?;
        trip.apply_update(input);
        self.commit(trip).await
    }

    /// Stops and bookings are embedded, so they go with the trip.
    pub async fn delete(&self, trip_id: &str, user_id: &str) -> Result<(), ApiError> {
        let trip = self.load_owned(trip_id, user_id).await?;
        if !self.store.delete_trip(&trip.id).await? {
            return Err(ApiError::not_found("Trip not found"));
        }
        log::info!("User {} deleted trip {}", user_id, trip.id);
        Ok(())
    }

    pub async fn add_stop(
        &self,
        trip_id: &str,
        user_id: &str,
        input: AddStopRequest,
    ) -> Result<PopulatedTrip, ApiError> {
        let mut trip = self.load_owned(trip_id, user_id).await?;
        let stop = input.validate()?;
        self.ensure_city_exists(&stop.city).await?;
        trip.add_stop(stop);
        self.commit(trip).await
    }

    pub async fn update_stop(
        &self,
        trip_id: &str,
        stop_id: &str,
        user_id: &str,
        input: UpdateStopRequest,
    ) -> Result<PopulatedTrip, ApiError> {
        let mut trip = self.load_owned(trip_id, user_id).await?;
        input.validate()?;
        if let Some(city) = &input.city {
            self.ensure_city_exists(city).await?;
        }
        trip.stop_mut(stop_id)
            .ok_or_else(|| ApiError::not_found("Stop not found"))?
            .apply_update(input)?;
        self.commit(trip).await
    }

    pub async fn remove_stop(
        &self,
        trip_id: &str,
        stop_id: &str,
        user_id: &str,
    ) -> Result<PopulatedTrip, ApiError> {
        let mut trip = self.load_owned(trip_id, user_id).await?;
        trip.remove_stop(stop_id)
            .ok_or_else(|| ApiError::not_found("Stop not found"))?;
        self.commit(trip).await
    }

    pub async fn add_booking(
        &self,
        trip_id: &str,
        stop_id: &str,
        user_id: &str,
        input: AddBookingRequest,
    ) -> Result<PopulatedTrip, ApiError> {
        let mut trip = self.load_owned(trip_id, user_id).await?;
        if trip.stop_mut(stop_id).is_none() {
            return Err(ApiError::not_found("Stop not found"));
        }
        let booking = input.validate()?;
        if self.store.find_activity(&booking.activity).await?.is_none() {
            return Err(ApiError::not_found("Activity not found"));
        }

        trip.stop_mut(stop_id)
            .ok_or_else(|| ApiError::not_found("Stop not found"))?
            .add_booking(booking);
        self.commit(trip).await
    }

    pub async fn remove_booking(
        &self,
        trip_id: &str,
        stop_id: &str,
        booking_id: &str,
        user_id: &str,
    ) -> Result<PopulatedTrip, ApiError> {
        let mut trip = self.load_owned(trip_id, user_id).await?;
        trip.stop_mut(stop_id)
            .ok_or_else(|| ApiError::not_found("Stop not found"))?
            .remove_booking(booking_id)
            .ok_or_else(|| ApiError::not_found("Activity booking not found"))?;
        self.commit(trip).await
    }

    /// Issues a fresh token, replacing any previous one, and makes the trip public.
    /// Nothing is saved unless the link can be built from `base`.
    pub async fn share(
        &self,
        trip_id: &str,
        user_id: &str,
        base: &str,
    ) -> Result<SharedLink, ApiError> {
        let mut trip = self.load_owned(trip_id, user_id).await?;
        let token = generate_share_token();
        let url = share_url(base, &token).map_err(|err| {
            ApiError::internal(format!("cannot build share link from base {:?}: {}", base, err))
        })?;

        trip.share_token = Some(token.clone());
        trip.is_public = true;
        self.persist(&mut trip).await?;
        log::info!("User {} shared trip {}", user_id, trip.id);
        Ok(SharedLink { token, url })
    }

    /// Public read. A trip made private again is hidden even if it still holds a token.
    pub async fn get_shared(&self, token: &str) -> Result<PopulatedTrip, ApiError> {
        let trip = self
            .store
            .find_trip_by_share_token(token)
            .await?
            .filter(|trip| trip.is_public)
            .ok_or_else(|| ApiError::not_found("Trip not found"))?;
        self.populate(trip).await
    }

    /// Recomputes the budget, writing it back only when the stored snapshot was stale.
    pub async fn budget(&self, trip_id: &str, user_id: &str) -> Result<BudgetSummary, ApiError> {
        let mut trip = self.load_owned(trip_id, user_id).await?;
        if BudgetService::refresh(&mut trip) {
            log::debug!("Budget for trip {} was stale, saving", trip.id);
            self.persist(&mut trip).await?;
        }
        Ok(BudgetService::summarize(&trip))
    }
}
