pub mod handlers;

pub(crate) mod serialization;

pub mod server;
