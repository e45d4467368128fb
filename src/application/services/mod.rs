pub mod location_service;
