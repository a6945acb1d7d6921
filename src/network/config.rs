//! API route configuration for the hosted location services.

use serde::Deserialize;

use crate::constants::{ENRICH_SERVER_URL, GEOCODE_SERVER_URL, PLACES_SERVER_URL};

/// Endpoint bases plus the API key appended to every request as `token=`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(rename = "apiKey", default)]
    api_key: String,
    #[serde(rename = "geocodeUrl", default = "default_geocode_url")]
    geocode_url: String,
    #[serde(rename = "enrichUrl", default = "default_enrich_url")]
    enrich_url: String,
    #[serde(rename = "placesUrl", default = "default_places_url")]
    places_url: String,
}

fn default_geocode_url() -> String {
    GEOCODE_SERVER_URL.to_string()
}

fn default_enrich_url() -> String {
    ENRICH_SERVER_URL.to_string()
}

fn default_places_url() -> String {
    PLACES_SERVER_URL.to_string()
}

impl Default for ApiConfig {
    /// Minimal default pointing at the production endpoints with no key.
    /// Only meant for unit tests and the early start-up phase before
    /// `init_api_config()` runs; production code must still initialize the
    /// global config so the real key is present.
    fn default() -> Self {
        Self {
            api_key: String::new(),
            geocode_url: default_geocode_url(),
            enrich_url: default_enrich_url(),
            places_url: default_places_url(),
        }
    }
}

impl ApiConfig {
    /// Create a new ApiConfig from the ARCGIS_API_KEY environment variable.
    pub fn new() -> Result<Self, &'static str> {
        // Env var is optional at compile time – the key can also arrive at
        // runtime via `init_api_config_js`.
        let key = option_env!("ARCGIS_API_KEY").unwrap_or("");
        Ok(Self {
            api_key: key.trim().to_string(),
            ..Self::default()
        })
    }

    /// Create a new ApiConfig from a bare key string.
    pub fn from_key(key: &str) -> Self {
        Self {
            api_key: key.trim().to_string(),
            ..Self::default()
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn geocode_url(&self) -> &str {
        self.geocode_url.trim_end_matches('/')
    }

    pub fn enrich_url(&self) -> &str {
        self.enrich_url.trim_end_matches('/')
    }

    pub fn places_url(&self) -> &str {
        self.places_url.trim_end_matches('/')
    }
}
