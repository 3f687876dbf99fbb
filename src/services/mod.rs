pub mod access_control;
pub mod budget_service;
pub mod catalog_service;
pub mod saved_destination_service;
pub mod share_service;
pub mod trip_service;
