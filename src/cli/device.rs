use crate::device::{DeviceStore, generate_uuid, get_or_create_device_id};

pub fn run(store: &dyn DeviceStore) {
    println!("{}", get_or_create_device_id(store));
}

pub fn generate() {
    println!("{}", generate_uuid());
}
