mod test_device_location;
mod test_service_info;
