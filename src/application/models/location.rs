/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 19/10/26
 ******************************************************************************/
use crate::presentation::serialization::{lenient_bool, lenient_f64, lenient_string};
use serde::{Deserialize, Serialize};

/// Tracking object as the backend returns it
///
/// Every field is optional: a device that has never reported a fix, or a
/// firmware that does not know about batteries, simply leaves keys out.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDeviceResponse {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lng: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub course: Option<f64>,
    #[serde(rename = "isGPS", default, deserialize_with = "lenient_bool")]
    pub is_gps: Option<bool>,
    #[serde(rename = "isStop", default, deserialize_with = "lenient_bool")]
    pub is_stop: Option<bool>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub battery: Option<f64>,
    #[serde(rename = "batteryStatus", default, deserialize_with = "lenient_string")]
    pub battery_status: Option<String>,
    #[serde(rename = "positionTime", default, deserialize_with = "lenient_string")]
    pub position_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(rename = "deviceName", default, deserialize_with = "lenient_string")]
    pub device_name: Option<String>,
    #[serde(rename = "serialNumber", default, deserialize_with = "lenient_string")]
    pub serial_number: Option<String>,
    #[serde(rename = "VIN", default, deserialize_with = "lenient_string")]
    pub vin: Option<String>,
    #[serde(rename = "ICCID", default, deserialize_with = "lenient_string")]
    pub iccid: Option<String>,
}

/// Normalized location record returned to HTTP callers.
///
/// Absent fields serialize as `null`; they are never dropped from the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed: Option<f64>,
    pub course: Option<f64>,
    pub is_gps: Option<bool>,
    pub is_stop: Option<bool>,
    pub battery: Option<f64>,
    pub battery_status: Option<String>,
    pub position_time: Option<String>,
    pub status: Option<String>,
    pub device_name: Option<String>,
    pub serial_number: Option<String>,
    pub vin: Option<String>,
    pub iccid: Option<String>,
}

impl From<RawDeviceResponse> for DeviceSnapshot {
    fn from(raw: RawDeviceResponse) -> Self {
        DeviceSnapshot {
            latitude: raw.lat,
            longitude: raw.lng,
            speed: raw.speed,
            course: raw.course,
            is_gps: raw.is_gps,
            is_stop: raw.is_stop,
            battery: raw.battery,
            battery_status: raw.battery_status,
            position_time: raw.position_time,
            status: raw.status,
            device_name: raw.device_name,
            serial_number: raw.serial_number,
            vin: raw.vin,
            iccid: raw.iccid,
        }
    }
}
