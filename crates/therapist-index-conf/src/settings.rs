//! Directory settings
//!
//! Settings come from an optional TOML file and are then overridden by
//! `THERAPIST_INDEX_*` environment variables.
//!
//! ```toml
//! site_name = "Therapist Index"
//! listing_post_type = "gd_place"
//!
//! [logging]
//! level = "info"
//!
//! [[filters]]
//! key = "insurance"
//! label = "Insurance"
//! column = "geodir_insurance_accepted"
//! control = "single-select"
//! match = "substring"
//! options = ["Aetna", "Cigna"]
//! ```
//!
//! Without a `filters` array the built-in therapist directory schema is used.

use crate::error::{SettingsError, SettingsResult};
use crate::logging::LoggingSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use therapist_index_filters::{FilterDefinition, FilterSchema};

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "THERAPIST_INDEX_";

/// Column/value pair every listing query is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BaseCondition {
	pub column: String,
	pub value: String,
}

impl Default for BaseCondition {
	fn default() -> Self {
		Self {
			column: "post_type".to_string(),
			value: "gd_place".to_string(),
		}
	}
}

/// Settings of one directory site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	/// Brand used in generated titles and descriptions
	pub site_name: String,
	/// Content type whose metadata is generated from listing attributes
	pub listing_post_type: String,
	/// Table rendered listing queries select from
	pub listing_table: String,
	pub base_condition: BaseCondition,
	pub logging: LoggingSettings,
	/// Filter definitions in display order
	pub filters: Option<Vec<FilterDefinition>>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			site_name: "Therapist Index".to_string(),
			listing_post_type: "gd_place".to_string(),
			listing_table: "listings".to_string(),
			base_condition: BaseCondition::default(),
			logging: LoggingSettings::default(),
			filters: None,
		}
	}
}

impl Settings {
	/// Parse settings from TOML text
	///
	/// # Examples
	///
	/// ```
	/// use therapist_index_conf::Settings;
	///
	/// let settings = Settings::from_toml_str(r#"site_name = "Shrink Finder""#).unwrap();
	/// assert_eq!(settings.site_name, "Shrink Finder");
	/// assert_eq!(settings.listing_post_type, "gd_place");
	/// ```
	pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
		let settings: Self = toml::from_str(content)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Read settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
		let path = path.as_ref();
		let content = fs::read_to_string(path)?;
		let settings = Self::from_toml_str(&content)?;
		tracing::info!(path = %path.display(), "Settings loaded");
		Ok(settings)
	}

	/// Read `path` when given, otherwise start from defaults
	pub fn load(path: Option<&Path>) -> SettingsResult<Self> {
		match path {
			Some(path) => Self::from_file(path),
			None => {
				tracing::debug!("No settings file given, using defaults");
				Ok(Self::default())
			}
		}
	}

	/// Apply `THERAPIST_INDEX_*` overrides from `vars`
	///
	/// Pass `std::env::vars()` in production. Blank or invalid values and
	/// unknown names are ignored with a warning.
	///
	/// # Examples
	///
	/// ```
	/// use std::collections::HashMap;
	/// use therapist_index_conf::Settings;
	///
	/// let mut settings = Settings::default();
	/// settings.apply_env_overrides(HashMap::from([
	///     ("THERAPIST_INDEX_SITE_NAME", "Shrink Finder"),
	///     ("PATH", "/usr/bin"),
	/// ]));
	/// assert_eq!(settings.site_name, "Shrink Finder");
	/// ```
	pub fn apply_env_overrides<I, K, V>(&mut self, vars: I)
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		for (name, value) in vars {
			let Some(suffix) = name.as_ref().strip_prefix(ENV_PREFIX) else {
				continue;
			};
			let value = value.as_ref().trim();
			if value.is_empty() {
				tracing::warn!(var = name.as_ref(), "Ignoring blank environment override");
				continue;
			}

			match suffix {
				"SITE_NAME" => self.site_name = value.to_string(),
				"LISTING_POST_TYPE" => self.listing_post_type = value.to_string(),
				"LOG_LEVEL" => {
					let logging = LoggingSettings {
						level: value.to_string(),
					};
					if let Err(e) = logging.env_filter() {
						tracing::warn!(var = name.as_ref(), error = %e, "Ignoring invalid log level");
						continue;
					}
					self.logging = logging;
				}
				_ => {
					tracing::warn!(var = name.as_ref(), "Ignoring unknown environment override");
					continue;
				}
			}
			tracing::debug!(var = name.as_ref(), "Applied environment override");
		}
	}

	/// Check the values serde cannot
	pub fn validate(&self) -> SettingsResult<()> {
		let required = [
			("site_name", &self.site_name),
			("listing_post_type", &self.listing_post_type),
			("listing_table", &self.listing_table),
			("base_condition.column", &self.base_condition.column),
		];
		for (key, value) in required {
			if value.trim().is_empty() {
				return Err(SettingsError::invalid(key, "must not be empty"));
			}
		}
		self.logging.env_filter()?;
		Ok(())
	}

	/// Validate the configured filters and build the schema
	///
	/// A broken schema is fatal; callers should refuse to start.
	pub fn build_schema(&self) -> SettingsResult<FilterSchema> {
		match &self.filters {
			Some(definitions) => Ok(FilterSchema::new(definitions.clone())?),
			None => Ok(FilterSchema::therapist_directory()),
		}
	}
}
