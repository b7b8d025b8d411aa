use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{PushError, Result};

/// Durable key/value storage for small string values.
pub trait DeviceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Stores each key as its own file under `storage_path`.
#[derive(Debug, Clone)]
pub struct FileStore {
    storage_path: PathBuf,
}

impl FileStore {
    pub fn new(storage_path: &str) -> Self {
        Self {
            storage_path: PathBuf::from(storage_path),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.storage_path.join(key)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new("./")
    }
}

impl DeviceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => {
                let value = value.trim();
                if value.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(value.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.storage_path)?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-process storage that lives as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeviceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| PushError::Storage(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .map_err(|e| PushError::Storage(e.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values
            .lock()
            .map_err(|e| PushError::Storage(e.to_string()))?
            .remove(key);
        Ok(())
    }
}
