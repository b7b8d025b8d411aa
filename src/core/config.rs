use std::env;

use crate::error::{PushError, Result};

pub const DEFAULT_SERVICE_WORKER_PATH: &str = "/sw.js";

/// Settings the subscription manager holds for its whole lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushConfig {
    /// VAPID public key as URL-safe base64 text
    pub public_key: String,
    pub api_base_url: String,
    pub service_worker_path: String,
    // Sent as `X-API-Key` on every backend request when present
    pub api_key: Option<String>,
}

impl PushConfig {
    pub fn new(public_key: &str, api_base_url: &str) -> Result<Self> {
        if public_key.trim().is_empty() {
            return Err(PushError::Config("Missing VAPID public key".to_string()));
        }
        if api_base_url.trim().is_empty() {
            return Err(PushError::Config("Missing API base URL".to_string()));
        }
        Ok(Self {
            public_key: public_key.trim().to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            service_worker_path: DEFAULT_SERVICE_WORKER_PATH.to_string(),
            api_key: None,
        })
    }

    pub fn with_service_worker_path(mut self, path: &str) -> Self {
        self.service_worker_path = path.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: Option<&str>) -> Self {
        self.api_key = api_key.map(|k| k.to_string());
        self
    }

    /// Build the config from `PUSH_HELPER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let public_key = env::var("PUSH_HELPER_VAPID_PUBLIC_KEY").map_err(|_| {
            PushError::Config("Missing env var PUSH_HELPER_VAPID_PUBLIC_KEY".to_string())
        })?;
        let api_base_url = env::var("PUSH_HELPER_API_URL")
            .map_err(|_| PushError::Config("Missing env var PUSH_HELPER_API_URL".to_string()))?;
        let service_worker_path = env::var("PUSH_HELPER_SW_PATH")
            .unwrap_or_else(|_| DEFAULT_SERVICE_WORKER_PATH.to_string());
        let api_key = env::var("PUSH_HELPER_API_KEY").ok();

        Ok(Self::new(&public_key, &api_base_url)?
            .with_service_worker_path(&service_worker_path)
            .with_api_key(api_key.as_deref()))
    }

    /// Full URL of a backend endpoint, e.g. `endpoint_url("subscribe")`.
    pub fn endpoint_url(&self, name: &str) -> String {
        format!("{}/{}", self.api_base_url, name.trim_start_matches('/'))
    }
}
