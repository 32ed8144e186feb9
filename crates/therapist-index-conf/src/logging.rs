//! Logging setup

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// `[logging]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
	/// Level or `EnvFilter` directive list, e.g. `"info"` or
	/// `"warn,therapist_index_filters=debug"`
	pub level: String,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: DEFAULT_LOG_LEVEL.to_string(),
		}
	}
}

impl LoggingSettings {
	/// Parse the configured level into a filter
	pub fn env_filter(&self) -> SettingsResult<EnvFilter> {
		EnvFilter::try_new(self.level.trim())
			.map_err(|e| SettingsError::invalid("logging.level", e.to_string()))
	}
}

/// Install the global fmt subscriber
///
/// Fails instead of panicking when the level does not parse or a global
/// subscriber is already installed.
pub fn init_logging(settings: &LoggingSettings) -> SettingsResult<()> {
	let filter = settings.env_filter()?;
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.try_init()
		.map_err(|e| SettingsError::Logging(e.to_string()))?;
	tracing::debug!(level = %settings.level, "Logging initialised");
	Ok(())
}
