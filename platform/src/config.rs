//! Platform configuration.
//!
//! Endpoint, project and resource identifiers are deployment values supplied
//! by the application, not hardcoded. `from_env` constructors read the
//! conventional environment variables once at construction time.

use crate::error::{PlatformError, Result};

/// Client-side platform configuration.
///
/// # Examples
///
/// ```
/// use gatherly_platform::PlatformConfig;
///
/// let config = PlatformConfig::new(
///     "https://cloud.gatherly.dev/v1".to_string(),
///     "events-prod".to_string(),
/// )
/// .with_database_id("main".to_string())
/// .with_events_collection_id("events".to_string())
/// .with_banner_bucket_id("banners".to_string())
/// .with_app_url("https://app.gatherly.dev".to_string());
///
/// assert_eq!(config.project_id, "events-prod");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Base REST endpoint of the platform, without a trailing slash.
    pub endpoint: String,

    /// Project identifier sent with every request.
    pub project_id: String,

    /// Document database holding the application's collections.
    pub database_id: String,

    /// Collection holding event documents.
    pub events_collection_id: String,

    /// Storage bucket holding event banner assets.
    pub banner_bucket_id: String,

    /// Base URL of the web application itself (redirect targets).
    pub app_url: String,
}

impl PlatformConfig {
    /// Create a new configuration for the given endpoint and project.
    ///
    /// A trailing slash on the endpoint is stripped so derived URLs stay
    /// stable.
    #[must_use]
    pub fn new(endpoint: String, project_id: String) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id,
            database_id: String::new(),
            events_collection_id: String::new(),
            banner_bucket_id: String::new(),
            app_url: "http://localhost:3000".to_string(),
        }
    }

    /// Set the document database identifier.
    #[must_use]
    pub fn with_database_id(mut self, database_id: String) -> Self {
        self.database_id = database_id;
        self
    }

    /// Set the events collection identifier.
    #[must_use]
    pub fn with_events_collection_id(mut self, collection_id: String) -> Self {
        self.events_collection_id = collection_id;
        self
    }

    /// Set the banner storage bucket identifier.
    #[must_use]
    pub fn with_banner_bucket_id(mut self, bucket_id: String) -> Self {
        self.banner_bucket_id = bucket_id;
        self
    }

    /// Set the web application base URL.
    ///
    /// A trailing slash is stripped so redirect targets concatenate cleanly.
    #[must_use]
    pub fn with_app_url(mut self, app_url: String) -> Self {
        self.app_url = app_url.trim_end_matches('/').to_string();
        self
    }

    /// Read the configuration from the environment.
    ///
    /// Reads `GATHERLY_ENDPOINT`, `GATHERLY_PROJECT_ID`,
    /// `GATHERLY_DATABASE_ID`, `GATHERLY_EVENTS_COLLECTION_ID`,
    /// `GATHERLY_BANNER_BUCKET_ID` and `GATHERLY_APP_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::MissingConfig`] naming the first variable
    /// that is not set.
    pub fn from_env() -> Result<Self> {
        Ok(
            Self::new(env_var("GATHERLY_ENDPOINT")?, env_var("GATHERLY_PROJECT_ID")?)
                .with_database_id(env_var("GATHERLY_DATABASE_ID")?)
                .with_events_collection_id(env_var("GATHERLY_EVENTS_COLLECTION_ID")?)
                .with_banner_bucket_id(env_var("GATHERLY_BANNER_BUCKET_ID")?)
                .with_app_url(env_var("GATHERLY_APP_URL")?),
        )
    }
}

/// Privileged configuration: a [`PlatformConfig`] plus the server API key.
///
/// Used only by the admin-side provisioning path; never ship the key to an
/// untrusted client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Shared platform configuration.
    pub platform: PlatformConfig,

    /// Server API key granting collection-management scopes.
    pub api_key: String,
}

impl AdminConfig {
    /// Create an admin configuration from a platform configuration and key.
    #[must_use]
    pub const fn new(platform: PlatformConfig, api_key: String) -> Self {
        Self { platform, api_key }
    }

    /// Read the configuration from the environment.
    ///
    /// Reads everything [`PlatformConfig::from_env`] reads, plus
    /// `GATHERLY_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::MissingConfig`] naming the first variable
    /// that is not set.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            PlatformConfig::from_env()?,
            env_var("GATHERLY_API_KEY")?,
        ))
    }
}

fn env_var(name: &'static str) -> Result<String> {
    std::env::var(name).map_err(|_| PlatformError::MissingConfig(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = PlatformConfig::new(
            "https://cloud.example.com/v1/".to_string(),
            "proj".to_string(),
        )
        .with_database_id("db".to_string())
        .with_events_collection_id("events".to_string())
        .with_banner_bucket_id("banners".to_string())
        .with_app_url("https://app.example.com/".to_string());

        // Trailing slashes are stripped from both URL-ish values.
        assert_eq!(config.endpoint, "https://cloud.example.com/v1");
        assert_eq!(config.app_url, "https://app.example.com");
        assert_eq!(config.database_id, "db");
        assert_eq!(config.events_collection_id, "events");
        assert_eq!(config.banner_bucket_id, "banners");
    }

    #[test]
    fn test_admin_config_wraps_platform_config() {
        let platform =
            PlatformConfig::new("https://cloud.example.com".to_string(), "proj".to_string());
        let admin = AdminConfig::new(platform.clone(), "secret-key".to_string());

        assert_eq!(admin.platform, platform);
        assert_eq!(admin.api_key, "secret-key");
    }

    #[test]
    fn test_missing_variable_is_named_in_error() {
        let result = env_var("GATHERLY_TEST_VARIABLE_THAT_IS_NEVER_SET");
        assert!(matches!(
            result,
            Err(PlatformError::MissingConfig(
                "GATHERLY_TEST_VARIABLE_THAT_IS_NEVER_SET"
            ))
        ));
    }
}
