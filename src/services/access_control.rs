use crate::{error::ApiError, models::trip::Trip};

/// Mutations are owner-only.
pub fn ensure_owner(trip: &Trip, user_id: &str) -> Result<(), ApiError> {
    if trip.is_owned_by(user_id) {
        Ok(())
    } else {
        log::warn!("User {} denied write access to trip {}", user_id, trip.id);
        Err(ApiError::forbidden("Not authorized to modify this trip"))
    }
}

/// Reads are allowed to the owner, or to anyone once the trip is public.
pub fn ensure_readable(trip: &Trip, user_id: &str) -> Result<(), ApiError> {
    if trip.is_owned_by(user_id) || trip.is_public {
        Ok(())
    } else {
        log::warn!("User {} denied read access to trip {}", user_id, trip.id);
        Err(ApiError::forbidden("Not authorized to access this trip"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{datetime::parse_datetime, trip::requests::NewTrip};

    fn trip() -> Trip {
        Trip::new(
            "owner",
            NewTrip {
                name: "Trip".to_string(),
                description: String::new(),
                start_date: parse_datetime("2025-06-01").unwrap(),
                end_date: parse_datetime("2025-06-02").unwrap(),
                cover_photo: String::new(),
            },
        )
    }

    #[test]
    fn test_owner_has_full_access() {
        let trip = trip();
        assert!(ensure_owner(&trip, "owner").is_ok());
        assert!(ensure_readable(&trip, "owner").is_ok());
    }

    #[test]
    fn test_stranger_needs_public_trip_to_read() {
        let mut trip = trip();
        assert!(matches!(ensure_readable(&trip, "stranger"), Err(ApiError::Forbidden(_))));

        trip.is_public = true;
        assert!(ensure_readable(&trip, "stranger").is_ok());
        assert!(matches!(ensure_owner(&trip, "stranger"), Err(ApiError::Forbidden(_))));
    }
}
