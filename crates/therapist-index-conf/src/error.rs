//! Settings errors

use therapist_index_filters::SchemaError;

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Error raised while loading settings or setting up logging
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid filter schema: {0}")]
	Schema(#[from] SchemaError),

	#[error("Invalid value for '{key}': {message}")]
	InvalidValue { key: String, message: String },

	#[error("Logging setup failed: {0}")]
	Logging(String),
}

impl SettingsError {
	pub(crate) fn invalid(key: &str, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			key: key.to_string(),
			message: message.into(),
		}
	}
}
