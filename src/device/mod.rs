//! Stable per-profile device identifier
pub mod store;
pub use store::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};
use uuid::Builder;

use crate::error::Result;

pub const DEVICE_ID_KEY: &str = "push_helper_device_id";

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns the persisted device id, creating and persisting one if
/// there is none. Storage failures fall back to an id that only lives
/// for this session.
pub fn get_or_create_device_id(store: &dyn DeviceStore) -> String {
    match store.get(DEVICE_ID_KEY) {
        Ok(Some(device_id)) => device_id,
        Ok(None) => {
            let device_id = generate_uuid();
            if let Err(e) = store.set(DEVICE_ID_KEY, &device_id) {
                tracing::warn!("Unable to persist device id, using a session id: {}", e);
            } else {
                tracing::debug!("Created device id {}", device_id);
            }
            device_id
        }
        Err(e) => {
            tracing::warn!("Device storage unavailable, using a session id: {}", e);
            generate_uuid()
        }
    }
}

pub fn clear_device_id(store: &dyn DeviceStore) -> Result<()> {
    store.remove(DEVICE_ID_KEY)
}

/// Random UUID v4 in lowercase hyphenated form.
pub fn generate_uuid() -> String {
    generate_uuid_with(&mut OsRng)
}

fn generate_uuid_with<R: RngCore>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    if let Err(e) = rng.try_fill_bytes(&mut bytes) {
        tracing::warn!("OS random source failed, using seeded generator: {}", e);
        return fallback_uuid();
    }
    Builder::from_random_bytes(bytes).into_uuid().to_string()
}

fn fallback_uuid() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let seed = nanos ^ FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed).rotate_left(32);

    let mut bytes = [0u8; 16];
    StdRng::seed_from_u64(seed).fill_bytes(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid().to_string()
}
