//! Schema validation errors

/// Result type for schema construction
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Error raised while validating filter definitions
///
/// Schema errors are fatal: a directory must refuse to start rather than
/// serve listings with an ambiguous filter schema.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
	#[error("Duplicate filter key: {0}")]
	DuplicateKey(String),

	#[error("Invalid filter key '{0}': keys must be non-empty and contain only ASCII letters, digits, '_' or '-'")]
	InvalidKey(String),

	#[error("Filter '{0}' has no target column")]
	EmptyColumn(String),

	#[error("Boolean toggle '{0}' requires a fixed search value")]
	MissingFixedSearchValue(String),

	#[error("Boolean toggle '{0}' must not declare options")]
	OptionsOnToggle(String),

	#[error("Multiple schema errors: {0:?}")]
	Multiple(Vec<SchemaError>),
}

impl SchemaError {
	/// Collapse a list of collected errors into a single error
	///
	/// Returns `None` when the list is empty.
	pub(crate) fn collect(mut errors: Vec<SchemaError>) -> Option<SchemaError> {
		match errors.len() {
			0 => None,
			1 => errors.pop(),
			_ => Some(SchemaError::Multiple(errors)),
		}
	}
}
