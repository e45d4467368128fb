pub mod location;
pub mod retrieval;
