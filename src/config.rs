// Configuration management

use crate::core::errors::SecurityError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;

/// Security configuration loaded from environment variables
///
/// All thresholds and durations are supplied at startup and handed to the
/// policy components at construction; nothing reads ambient settings at
/// decision time. All values are validated on load with clear error
/// messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Lockout configuration
    pub login_attempt_threshold: u32,
    pub lockout_duration_secs: u64,

    // OTP configuration
    pub otp_expiration_secs: u64,
    pub otp_code_length: usize,

    // Logging configuration
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Supports `.env` file loading in development (via dotenv crate).
    ///
    /// # Returns
    /// * `Result<Self, SecurityError>` - Config instance or validation error
    pub fn from_env() -> Result<Self, SecurityError> {
        // Load .env file if present (development)
        // Skip in test environment to avoid interfering with test environment variables
        #[cfg(not(test))]
        {
            dotenv::dotenv().ok(); // Ignore errors (file may not exist)
        }

        let config = Self {
            login_attempt_threshold: Self::parse_u32_or_default("LOGIN_ATTEMPT_THRESHOLD", 3)?,
            lockout_duration_secs: Self::parse_u64_or_default("LOCKOUT_DURATION_SECS", 900)?,
            otp_expiration_secs: Self::parse_u64_or_default("OTP_EXPIRATION_SECS", 600)?,
            otp_code_length: Self::parse_usize_or_default("OTP_CODE_LENGTH", 6)?,
            log_level: Self::get_env_or_default("LOG_LEVEL", "info")?,
            log_format: Self::get_env_or_default("LOG_FORMAT", "json")?,
        };

        // Post-load validation
        config.validate()?;

        Ok(config)
    }

    /// Lockout window as a duration
    pub fn lockout_duration(&self) -> Duration {
        Duration::seconds(self.lockout_duration_secs as i64)
    }

    /// Default OTP validity as a duration
    pub fn otp_expiration(&self) -> Duration {
        Duration::seconds(self.otp_expiration_secs as i64)
    }

    /// Get environment variable or return default value
    fn get_env_or_default(key: &str, default: &str) -> Result<String, SecurityError> {
        Ok(env::var(key).unwrap_or_else(|_| default.to_string()))
    }

    /// Parse u32 from environment variable or return default
    fn parse_u32_or_default(key: &str, default: u32) -> Result<u32, SecurityError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<u32>().map_err(|e| {
                    SecurityError::ConfigurationError(format!(
                        "Invalid {} value '{}': {}",
                        key, value, e
                    ))
                })?;

                if parsed == 0 {
                    return Err(SecurityError::ConfigurationError(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    /// Parse u64 from environment variable or return default
    fn parse_u64_or_default(key: &str, default: u64) -> Result<u64, SecurityError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<u64>().map_err(|e| {
                    SecurityError::ConfigurationError(format!(
                        "Invalid {} value '{}': {}",
                        key, value, e
                    ))
                })?;

                if parsed == 0 {
                    return Err(SecurityError::ConfigurationError(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    /// Parse usize from environment variable or return default
    fn parse_usize_or_default(key: &str, default: usize) -> Result<usize, SecurityError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<usize>().map_err(|e| {
                    SecurityError::ConfigurationError(format!(
                        "Invalid {} value '{}': {}",
                        key, value, e
                    ))
                })?;

                if parsed == 0 {
                    return Err(SecurityError::ConfigurationError(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    /// Validate all configuration values
    fn validate(&self) -> Result<(), SecurityError> {
        Self::validate_log_level(&self.log_level)?;
        Self::validate_log_format(&self.log_format)?;
        Ok(())
    }

    /// Validate log level
    fn validate_log_level(level: &str) -> Result<(), SecurityError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&level.to_lowercase().as_str()) {
            return Err(SecurityError::ConfigurationError(format!(
                "Invalid LOG_LEVEL '{}': must be one of {}",
                level,
                valid_levels.join(", ")
            )));
        }
        Ok(())
    }

    /// Validate log format
    fn validate_log_format(format: &str) -> Result<(), SecurityError> {
        if format != "json" && format != "text" {
            return Err(SecurityError::ConfigurationError(format!(
                "Invalid LOG_FORMAT '{}': must be 'json' or 'text'",
                format
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Create a test configuration for unit tests
    ///
    /// This bypasses environment variable loading for use in tests that
    /// don't need real configuration.
    pub fn test_config() -> Self {
        Self {
            login_attempt_threshold: 3,
            lockout_duration_secs: 900,
            otp_expiration_secs: 600,
            otp_code_length: 6,
            log_level: "info".to_string(),
            log_format: "json".to_string(),
        }
    }
}
