//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.attachment.max_file_size_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "attachment.max_file_size_bytes must be > 0".into(),
            ));
        }
        if self.attachment.read_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "attachment.read_timeout_ms must be > 0".into(),
            ));
        }
        if self.transcode.max_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "transcode.max_dimension must be > 0".into(),
            ));
        }
        if !(self.transcode.quality > 0.0 && self.transcode.quality <= 1.0) {
            return Err(ConfigError::ValidationError(
                "transcode.quality must be in (0.0, 1.0]".into(),
            ));
        }
        if self.transcode.max_decode_alloc_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "transcode.max_decode_alloc_bytes must be > 0".into(),
            ));
        }
        if self.transcode.timeout_ms == Some(0) {
            return Err(ConfigError::ValidationError(
                "transcode.timeout_ms must be > 0".into(),
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.base_url must not be empty".into(),
            ));
        }
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_file_size() {
        let mut config = Config::default();
        config.attachment.max_file_size_bytes = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_file_size_bytes"));
    }

    #[test]
    fn test_validate_rejects_invalid_quality() {
        let mut config = Config::default();
        config.transcode.quality = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quality"));

        config.transcode.quality = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quality"));

        config.transcode.quality = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_decode_alloc() {
        let mut config = Config::default();
        config.transcode.max_decode_alloc_bytes = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_decode_alloc_bytes"));
    }

    #[test]
    fn test_validate_rejects_zero_transcode_timeout() {
        let mut config = Config::default();
        config.transcode.timeout_ms = Some(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("transcode.timeout_ms"));

        config.transcode.timeout_ms = Some(5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.api.base_url = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }
}
