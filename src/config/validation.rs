//! Configuration and settings validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use crate::settings::{SaveLocation, Settings};
use regex::Regex;
use url::Url;

/// Upper bound for the retained history size.
pub const MAX_HISTORY_ITEMS: u32 = 1000;

/// Upper bound for synthetic web progress steps.
const MAX_PROGRESS_STEPS: u32 = 1000;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(endpoint) = &config.resolver.endpoint {
        validate_endpoint(endpoint)?;
    }

    if config.resolver.timeout_seconds == 0 {
        return Err(Error::ConfigValidation {
            field: "resolver.timeout_seconds".to_string(),
            message: "Timeout must be at least 1 second".to_string(),
        });
    }

    if config.web.progress_steps == 0 || config.web.progress_steps > MAX_PROGRESS_STEPS {
        return Err(Error::ConfigValidation {
            field: "web.progress_steps".to_string(),
            message: format!(
                "Progress steps must be between 1 and {} (got {})",
                MAX_PROGRESS_STEPS, config.web.progress_steps
            ),
        });
    }

    if config.web.tick_millis == 0 {
        return Err(Error::ConfigValidation {
            field: "web.tick_millis".to_string(),
            message: "Tick interval must be at least 1 millisecond".to_string(),
        });
    }

    Ok(())
}

/// Validate the resolver backend URL.
pub fn validate_endpoint(endpoint: &str) -> Result<()> {
    let scheme_pattern = Regex::new(r"(?i)^https?://").map_err(|e| Error::Config(e.to_string()))?;

    if !scheme_pattern.is_match(endpoint) {
        return Err(Error::ConfigValidation {
            field: "resolver.endpoint".to_string(),
            message: format!("Endpoint '{}' must start with http:// or https://", endpoint),
        });
    }

    let url = Url::parse(endpoint).map_err(|e| Error::ConfigValidation {
        field: "resolver.endpoint".to_string(),
        message: format!("Endpoint '{}' is not a valid URL: {}", endpoint, e),
    })?;

    if url.host_str().is_none() {
        return Err(Error::ConfigValidation {
            field: "resolver.endpoint".to_string(),
            message: format!("Endpoint '{}' has no host", endpoint),
        });
    }

    Ok(())
}

/// Validate merged user settings before they are persisted.
pub fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.max_concurrent_downloads < 1 {
        return Err(Error::ConfigValidation {
            field: "max_concurrent_downloads".to_string(),
            message: "At least one concurrent download is required".to_string(),
        });
    }

    if settings.max_history_items < 1 || settings.max_history_items > MAX_HISTORY_ITEMS {
        return Err(Error::ConfigValidation {
            field: "max_history_items".to_string(),
            message: format!(
                "History size must be between 1 and {} (got {})",
                MAX_HISTORY_ITEMS, settings.max_history_items
            ),
        });
    }

    if settings.save_location == SaveLocation::Custom && settings.custom_location.trim().is_empty()
    {
        return Err(Error::ConfigValidation {
            field: "customLocation".to_string(),
            message: "A custom save location needs a path".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_endpoint_schemes() {
        assert!(validate_endpoint("http://localhost:8000").is_ok());
        assert!(validate_endpoint("HTTPS://api.example.com/v1").is_ok());
        assert!(validate_endpoint("ftp://example.com").is_err());
        assert!(validate_endpoint("localhost:8000").is_err());
    }

    #[test]
    fn test_zero_web_steps_rejected() {
        let mut config = Config::default();
        config.web.progress_steps = 0;
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { field, .. }) if field == "web.progress_steps"
        ));
    }

    #[test]
    fn test_zero_tick_rejected() {
        let mut config = Config::default();
        config.web.tick_millis = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_settings_bounds() {
        assert!(validate_settings(&Settings::default()).is_ok());

        let mut settings = Settings::default();
        settings.max_concurrent_downloads = 0;
        assert!(validate_settings(&settings).is_err());

        let mut settings = Settings::default();
        settings.max_history_items = MAX_HISTORY_ITEMS + 1;
        assert!(validate_settings(&settings).is_err());

        settings.max_history_items = MAX_HISTORY_ITEMS;
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_custom_location_requires_path() {
        let mut settings = Settings::default();
        settings.save_location = SaveLocation::Custom;
        assert!(validate_settings(&settings).is_err());

        settings.custom_location = "/media/usb".to_string();
        assert!(validate_settings(&settings).is_ok());
    }
}
