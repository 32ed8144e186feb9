//! Filter schema registry
//!
//! A [`FilterSchema`] is the ordered, validated set of [`FilterDefinition`]s a
//! directory exposes. It is built once at startup and only read afterwards, so
//! it can be shared between requests without synchronization.
//!
//! # Examples
//!
//! ```
//! use therapist_index_filters::{FilterDefinition, FilterSchema, MatchStrategy};
//!
//! let schema = FilterSchema::new(vec![
//!     FilterDefinition::select("insurance", "Insurance", "geodir_insurance_accepted", MatchStrategy::Substring)
//!         .with_options(["Aetna", "Cigna"]),
//!     FilterDefinition::toggle("telehealth", "Telehealth", "geodir_telehealth", MatchStrategy::Substring, "Yes"),
//! ])
//! .unwrap();
//!
//! assert_eq!(schema.len(), 2);
//! assert!(schema.get("telehealth").is_some());
//! ```

use crate::error::{SchemaError, SchemaResult};
use crate::predicate::PredicateOperator;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// UI control used to render a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
	/// Drop-down with a fixed list of options
	SingleSelect,
	/// On/off switch
	BooleanToggle,
}

/// How an active value is matched against the target column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
	/// Column contains the literal
	Substring,
	/// Column equals the literal
	Exact,
}

impl MatchStrategy {
	/// Predicate operator compiled for this strategy
	pub fn operator(self) -> PredicateOperator {
		match self {
			MatchStrategy::Substring => PredicateOperator::Contains,
			MatchStrategy::Exact => PredicateOperator::Equals,
		}
	}
}

/// A single filter facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterDefinition {
	/// URL parameter name and lookup key
	pub key: String,
	/// Label displayed next to the control
	pub label: String,
	/// Target attribute in the listing store
	pub column: String,
	/// Control rendered for the filter
	#[serde(rename = "control")]
	pub control_kind: ControlKind,
	/// Match strategy used when compiling predicates
	#[serde(rename = "match")]
	pub match_strategy: MatchStrategy,
	/// Allowed values, in display order (single-select only)
	#[serde(default)]
	pub options: Vec<String>,
	/// Literal searched for when a boolean toggle is active
	#[serde(default)]
	pub fixed_search_value: Option<String>,
}

impl FilterDefinition {
	/// Create a single-select filter with no options
	pub fn select(
		key: impl Into<String>,
		label: impl Into<String>,
		column: impl Into<String>,
		match_strategy: MatchStrategy,
	) -> Self {
		Self {
			key: key.into(),
			label: label.into(),
			column: column.into(),
			control_kind: ControlKind::SingleSelect,
			match_strategy,
			options: Vec::new(),
			fixed_search_value: None,
		}
	}

	/// Create a boolean toggle that searches for `fixed_search_value` when active
	pub fn toggle(
		key: impl Into<String>,
		label: impl Into<String>,
		column: impl Into<String>,
		match_strategy: MatchStrategy,
		fixed_search_value: impl Into<String>,
	) -> Self {
		Self {
			key: key.into(),
			label: label.into(),
			column: column.into(),
			control_kind: ControlKind::BooleanToggle,
			match_strategy,
			options: Vec::new(),
			fixed_search_value: Some(fixed_search_value.into()),
		}
	}

	/// Replace the option list
	pub fn with_options<I, S>(mut self, options: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.options = options.into_iter().map(Into::into).collect();
		self
	}

	/// Whether this filter renders as a boolean toggle
	pub fn is_toggle(&self) -> bool {
		self.control_kind == ControlKind::BooleanToggle
	}

	fn validate(&self, errors: &mut Vec<SchemaError>) {
		if !is_valid_key(&self.key) {
			errors.push(SchemaError::InvalidKey(self.key.clone()));
		}
		if self.column.trim().is_empty() {
			errors.push(SchemaError::EmptyColumn(self.key.clone()));
		}
		if self.is_toggle() {
			let has_fixed = self
				.fixed_search_value
				.as_deref()
				.is_some_and(|value| !value.is_empty());
			if !has_fixed {
				errors.push(SchemaError::MissingFixedSearchValue(self.key.clone()));
			}
			if !self.options.is_empty() {
				errors.push(SchemaError::OptionsOnToggle(self.key.clone()));
			}
		}
	}
}

fn is_valid_key(key: &str) -> bool {
	!key.is_empty()
		&& key
			.bytes()
			.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Every problem found in `definitions`, in definition order
fn validation_errors(definitions: &[FilterDefinition]) -> Vec<SchemaError> {
	let mut errors = Vec::new();
	let mut seen = HashSet::new();

	for definition in definitions {
		definition.validate(&mut errors);
		if !seen.insert(definition.key.as_str()) {
			errors.push(SchemaError::DuplicateKey(definition.key.clone()));
		}
	}
	errors
}

/// Ordered, validated collection of filter definitions
#[derive(Debug, Clone)]
pub struct FilterSchema {
	definitions: Vec<FilterDefinition>,
	index: HashMap<String, usize>,
}

impl FilterSchema {
	/// Validate `definitions` and build a schema
	///
	/// Every definition is checked and all problems are reported together.
	///
	/// # Examples
	///
	/// ```
	/// use therapist_index_filters::{FilterDefinition, FilterSchema, MatchStrategy, SchemaError};
	///
	/// let result = FilterSchema::new(vec![
	///     FilterDefinition::select("gender", "Gender", "geodir_gender", MatchStrategy::Exact),
	///     FilterDefinition::select("gender", "Gender", "geodir_gender", MatchStrategy::Exact),
	/// ]);
	/// assert_eq!(result.unwrap_err(), SchemaError::DuplicateKey("gender".to_string()));
	/// ```
	pub fn new(definitions: Vec<FilterDefinition>) -> SchemaResult<Self> {
		if let Some(error) = SchemaError::collect(validation_errors(&definitions)) {
			return Err(error);
		}
		Ok(Self::loaded(definitions))
	}

	/// Built-in schema of the therapist directory
	///
	/// The built-in definitions are checked by the same rules as [`FilterSchema::new`]
	/// in debug builds.
	pub fn therapist_directory() -> Self {
		let definitions = therapist_directory_definitions();
		debug_assert!(validation_errors(&definitions).is_empty());
		Self::loaded(definitions)
	}

	fn loaded(definitions: Vec<FilterDefinition>) -> Self {
		let index = definitions
			.iter()
			.enumerate()
			.map(|(position, definition)| (definition.key.clone(), position))
			.collect();
		let schema = Self { definitions, index };
		tracing::info!(filters = schema.len(), "Filter schema loaded");
		schema
	}

	/// Definitions in schema order
	pub fn definitions(&self) -> &[FilterDefinition] {
		&self.definitions
	}

	/// Iterate definitions in schema order
	pub fn iter(&self) -> std::slice::Iter<'_, FilterDefinition> {
		self.definitions.iter()
	}

	/// Look up a definition by key
	pub fn get(&self, key: &str) -> Option<&FilterDefinition> {
		self.position(key).map(|position| &self.definitions[position])
	}

	/// Schema position of `key`
	pub fn position(&self, key: &str) -> Option<usize> {
		self.index.get(key).copied()
	}

	/// Whether `key` names a filter
	pub fn contains_key(&self, key: &str) -> bool {
		self.index.contains_key(key)
	}

	/// Number of filters
	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	/// Whether the schema defines no filters
	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

impl<'a> IntoIterator for &'a FilterSchema {
	type Item = &'a FilterDefinition;
	type IntoIter = std::slice::Iter<'a, FilterDefinition>;

	fn into_iter(self) -> Self::IntoIter {
		self.definitions.iter()
	}
}

/// Filter definitions of the therapist directory, in display order
pub fn therapist_directory_definitions() -> Vec<FilterDefinition> {
	vec![
		FilterDefinition::select(
			"insurance",
			"Insurance",
			"geodir_insurance_accepted",
			MatchStrategy::Substring,
		)
		.with_options([
			"Aetna",
			"Blue Cross Blue Shield",
			"CareFirst",
			"Cigna",
			"Johns Hopkins EHP",
			"Kaiser Permanente",
			"Magellan",
			"Medicaid",
			"Medicare",
			"Optum",
			"Tricare",
			"UnitedHealthcare",
		]),
		FilterDefinition::select(
			"specialization",
			"Specialization",
			"geodir_specializations",
			MatchStrategy::Substring,
		)
		.with_options([
			"ADHD",
			"Addiction",
			"Anxiety",
			"Couples Therapy",
			"Depression",
			"Eating Disorders",
			"Grief",
			"LGBTQ+",
			"OCD",
			"PTSD/Trauma",
		]),
		FilterDefinition::select(
			"license_type",
			"License",
			"geodir_license_type",
			MatchStrategy::Exact,
		)
		.with_options([
			"LCSW", "LPC", "LCPC", "LMFT", "LCMFT", "PsyD", "PhD", "MD/Psychiatrist",
		]),
		FilterDefinition::select("gender", "Gender", "geodir_gender", MatchStrategy::Exact)
			.with_options(["Female", "Male", "Non-binary"]),
		FilterDefinition::select(
			"language",
			"Language",
			"geodir_languages",
			MatchStrategy::Substring,
		)
		.with_options(["English", "Spanish", "French", "Mandarin", "Korean", "Amharic"]),
		FilterDefinition::toggle(
			"telehealth",
			"Offers telehealth",
			"geodir_telehealth",
			MatchStrategy::Substring,
			"Yes",
		),
		FilterDefinition::toggle(
			"accepting",
			"Accepting new patients",
			"geodir_accepting_new_patients",
			MatchStrategy::Exact,
			"Yes",
		),
		FilterDefinition::toggle(
			"sliding_scale",
			"Sliding scale fees",
			"geodir_sliding_scale",
			MatchStrategy::Exact,
			"Yes",
		),
	]
}
