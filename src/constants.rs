/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

pub const SERVICE_NAME: &str = "GPS OBD2 Tracker API";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) const DEFAULT_TRACKER_BASE_URL: &str = "https://en.aika168.com/";
pub(crate) const DEFAULT_TRACKER_TIMEOUT: u64 = 30;
pub(crate) const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub(crate) const DEFAULT_SERVER_PORT: u16 = 5000;

pub(crate) const LOGIN_ENDPOINT: &str = "/api/session";
pub(crate) const TRACKING_ENDPOINT: &str = "/api/tracking";
pub(crate) const SESSION_TOKEN_HEADER_KEY: &str = "X-Session-Token";

pub const MISSING_PARAMETERS_ERROR: &str = "Missing required parameters";
pub const MISSING_PARAMETERS_MESSAGE: &str = "Both id and password parameters are required";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
