//! # Therapist Index Conf
//!
//! Settings loading (TOML file plus `THERAPIST_INDEX_*` environment
//! overrides), filter schema construction from settings and logging setup.
//!
//! ```no_run
//! use std::path::Path;
//! use therapist_index_conf::{Settings, init_logging};
//!
//! let mut settings = Settings::load(Some(Path::new("therapist-index.toml")))?;
//! settings.apply_env_overrides(std::env::vars());
//! init_logging(&settings.logging)?;
//! let schema = settings.build_schema()?;
//! # Ok::<(), therapist_index_conf::SettingsError>(())
//! ```

pub mod error;
pub mod logging;
pub mod settings;

pub use error::{SettingsError, SettingsResult};
pub use logging::{DEFAULT_LOG_LEVEL, LoggingSettings, init_logging};
pub use settings::{BaseCondition, ENV_PREFIX, Settings};
