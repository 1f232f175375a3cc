/// Backend address selection
///
/// The base address is fixed at build time: debug builds talk to a local
/// backend, release builds to the deployed one. Setting `TRYON_API_URL`
/// while compiling overrides both.

/// Local development backend
const LOCAL_API_URL: &str = "http://localhost:3001";

/// Deployed backend
const DEPLOYED_API_URL: &str = "https://your-backend-url.onrender.com";

/// Path of the generation endpoint on the backend
const GENERATE_PATH: &str = "/api/generate";

/// Resolved client settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base address of the generation backend (scheme + host + optional port)
    pub api_base_url: String,
}

impl Settings {
    /// Settings as selected by the build profile
    pub fn from_build() -> Self {
        let api_base_url = match option_env!("TRYON_API_URL") {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ if cfg!(debug_assertions) => LOCAL_API_URL.to_string(),
            _ => DEPLOYED_API_URL.to_string(),
        };

        Self { api_base_url }
    }

    /// Create settings pointing at an explicit base address
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self { api_base_url: api_base_url.into() }
    }

    /// Full URL of the generation endpoint
    pub fn generate_endpoint(&self) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), GENERATE_PATH)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_endpoint() {
        let settings = Settings::with_base_url("http://localhost:3001");
        assert_eq!(settings.generate_endpoint(), "http://localhost:3001/api/generate");
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let settings = Settings::with_base_url("https://example.org/");
        assert_eq!(settings.generate_endpoint(), "https://example.org/api/generate");
    }

    #[test]
    fn test_build_settings_are_never_empty() {
        let settings = Settings::from_build();
        assert!(settings.api_base_url.starts_with("http"));
    }
}
