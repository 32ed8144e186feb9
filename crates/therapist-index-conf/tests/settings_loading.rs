//! Settings loading tests
//!
//! Reads settings files from a temporary directory and layers environment
//! overrides on top.

use rstest::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use therapist_index_conf::{Settings, SettingsError};

#[fixture]
fn temp_dir() -> TempDir {
	TempDir::new().unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
	let path = dir.path().join(name);
	fs::write(&path, content).unwrap();
	path
}

/// Test: file values replace defaults, missing values keep them
///
/// Category: Happy Path
#[rstest]
fn test_load_from_file(temp_dir: TempDir) {
	let path = write(
		&temp_dir,
		"therapist-index.toml",
		r#"
site_name = "Shrink Finder"
listing_table = "wp_geodir_gd_place_detail"

[logging]
level = "debug"
"#,
	);

	let settings = Settings::load(Some(path.as_path())).unwrap();
	assert_eq!(settings.site_name, "Shrink Finder");
	assert_eq!(settings.listing_table, "wp_geodir_gd_place_detail");
	assert_eq!(settings.listing_post_type, "gd_place");
	assert_eq!(settings.logging.level, "debug");
	assert!(settings.filters.is_none());
}

/// Test: no path means defaults
///
/// Category: Sanity
#[rstest]
fn test_load_without_path() {
	assert_eq!(Settings::load(None).unwrap(), Settings::default());
}

/// Test: a missing file is an IO error
///
/// Category: Error Path
#[rstest]
fn test_missing_file(temp_dir: TempDir) {
	let result = Settings::from_file(temp_dir.path().join("absent.toml"));
	assert!(matches!(result, Err(SettingsError::Io(_))));
}

/// Test: malformed TOML is reported as such
///
/// Category: Error Path
#[rstest]
fn test_malformed_file(temp_dir: TempDir) {
	let path = write(&temp_dir, "broken.toml", "site_name = ");
	assert!(matches!(Settings::from_file(&path), Err(SettingsError::Toml(_))));
}

/// Test: environment overrides win over file values
///
/// Category: Use Case
#[rstest]
fn test_env_overrides_file(temp_dir: TempDir) {
	let path = write(
		&temp_dir,
		"therapist-index.toml",
		"site_name = \"Shrink Finder\"\nlisting_post_type = \"gd_place\"\n",
	);

	let mut settings = Settings::load(Some(path.as_path())).unwrap();
	settings.apply_env_overrides([
		("THERAPIST_INDEX_LISTING_POST_TYPE", "gd_therapist"),
		("THERAPIST_INDEX_LOG_LEVEL", "warn"),
	]);

	assert_eq!(settings.site_name, "Shrink Finder");
	assert_eq!(settings.listing_post_type, "gd_therapist");
	assert_eq!(settings.logging.level, "warn");
}

/// Test: a file with duplicate filter keys cannot build a schema
///
/// Category: Error Path
#[rstest]
fn test_duplicate_filter_keys_in_file(temp_dir: TempDir) {
	let definition = r#"
[[filters]]
key = "gender"
label = "Gender"
column = "geodir_gender"
control = "single-select"
match = "exact"
"#;
	let path = write(&temp_dir, "dup.toml", &definition.repeat(2));

	let settings = Settings::from_file(&path).unwrap();
	assert!(matches!(
		settings.build_schema(),
		Err(SettingsError::Schema(_))
	));
}
