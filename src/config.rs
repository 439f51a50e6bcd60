//! Configuration management

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Nominatim API URL (geocoding)
    pub nominatim_url: String,

    /// OSRM routing engine URL
    pub osrm_url: String,

    /// Geocoder backend: "nominatim" or "mock"
    pub geocoder_backend: String,

    /// Router backend: "osrm" or "mock"
    pub router_backend: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        let nominatim_url = std::env::var("NOMINATIM_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());

        let osrm_url = std::env::var("OSRM_URL")
            .unwrap_or_else(|_| "https://router.project-osrm.org".to_string());

        let geocoder_backend =
            std::env::var("GEOCODER_BACKEND").unwrap_or_else(|_| "nominatim".to_string());

        let router_backend =
            std::env::var("ROUTER_BACKEND").unwrap_or_else(|_| "osrm".to_string());

        Self {
            bind_addr,
            nominatim_url,
            osrm_url,
            geocoder_backend,
            router_backend,
        }
    }

    /// Fixed configuration for unit tests, independent of the environment
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            nominatim_url: "https://nominatim.openstreetmap.org".to_string(),
            osrm_url: "https://router.project-osrm.org".to_string(),
            geocoder_backend: "mock".to_string(),
            router_backend: "mock".to_string(),
        }
    }
}
