//! Filter state codec
//!
//! Decodes incoming request parameters into an [`ActiveFilterState`] and
//! encodes that state back into query parameters for outbound links.
//!
//! Decoding is permissive: the parameter namespace is shared with free-text
//! search, geo-proximity and pagination, so unknown names are ignored rather
//! than rejected. Empty values and the literal `"0"` are dropped, which makes
//! the codec intentionally lossy for those inputs.

use crate::schema::{ControlKind, FilterDefinition, FilterSchema};
use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Characters left unescaped in encoded query values (RFC 3986 unreserved)
pub(crate) const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'.')
	.remove(b'_')
	.remove(b'~');

/// Percent-encode a query parameter value
pub(crate) fn encode_value(value: &str) -> String {
	utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Read access to raw request parameters
///
/// Implemented for the common map types so callers can pass whatever their
/// request layer already produced.
pub trait ParamSource {
	/// Raw value submitted for `key`, if any
	fn param(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> ParamSource for HashMap<String, String, S> {
	fn param(&self, key: &str) -> Option<&str> {
		self.get(key).map(String::as_str)
	}
}

impl ParamSource for BTreeMap<String, String> {
	fn param(&self, key: &str) -> Option<&str> {
		self.get(key).map(String::as_str)
	}
}

impl<S: BuildHasher> ParamSource for IndexMap<String, String, S> {
	fn param(&self, key: &str) -> Option<&str> {
		self.get(key).map(String::as_str)
	}
}

/// Value of an active filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveValue {
	/// Option chosen in a single-select control
	Selected(String),
	/// A boolean toggle switched on; keeps the submitted marker (usually `"1"`)
	Toggled(String),
}

impl ActiveValue {
	fn for_kind(kind: ControlKind, submitted: &str) -> Self {
		match kind {
			ControlKind::SingleSelect => ActiveValue::Selected(submitted.to_string()),
			ControlKind::BooleanToggle => ActiveValue::Toggled(submitted.to_string()),
		}
	}

	/// The string originally submitted
	pub fn submitted(&self) -> &str {
		match self {
			ActiveValue::Selected(value) | ActiveValue::Toggled(value) => value,
		}
	}

	/// Whether this value came from a boolean toggle
	pub fn is_toggle(&self) -> bool {
		matches!(self, ActiveValue::Toggled(_))
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveFilter {
	key: String,
	position: usize,
	value: ActiveValue,
}

/// Filters carrying a value for the current request
///
/// Entries are kept in schema order, which makes encoded query strings and
/// compiled predicates reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilterState {
	filters: Vec<ActiveFilter>,
}

/// Whether a submitted value counts as "not set"
fn is_unset(raw: &str) -> bool {
	let trimmed = raw.trim();
	trimmed.is_empty() || trimmed == "0"
}

impl ActiveFilterState {
	/// Decode raw request parameters against `schema`
	///
	/// # Examples
	///
	/// ```
	/// use std::collections::HashMap;
	/// use therapist_index_filters::{ActiveFilterState, FilterSchema};
	///
	/// let schema = FilterSchema::therapist_directory();
	/// let params = HashMap::from([
	///     ("insurance".to_string(), "Aetna".to_string()),
	///     ("telehealth".to_string(), "1".to_string()),
	///     ("gender".to_string(), "0".to_string()),
	///     ("s".to_string(), "anxiety".to_string()),
	/// ]);
	///
	/// let state = ActiveFilterState::decode(&schema, &params);
	/// assert_eq!(state.len(), 2);
	/// assert_eq!(state.value("insurance"), Some("Aetna"));
	/// assert!(state.is_active("telehealth"));
	/// assert!(!state.is_active("gender"));
	/// ```
	pub fn decode<P: ParamSource + ?Sized>(schema: &FilterSchema, params: &P) -> Self {
		let mut filters = Vec::new();

		for (position, definition) in schema.iter().enumerate() {
			let Some(raw) = params.param(&definition.key) else {
				continue;
			};
			if is_unset(raw) {
				tracing::debug!(key = %definition.key, "Dropping unset filter value");
				continue;
			}
			filters.push(ActiveFilter {
				key: definition.key.clone(),
				position,
				value: ActiveValue::for_kind(definition.control_kind, raw),
			});
		}

		tracing::debug!(active = filters.len(), "Decoded filter state");
		Self { filters }
	}

	/// One entry per active filter, in schema order, valued with the submitted string
	pub fn encode(&self) -> IndexMap<String, String> {
		self.filters
			.iter()
			.map(|filter| (filter.key.clone(), filter.value.submitted().to_string()))
			.collect()
	}

	/// Render the encoded state as a query-string fragment (`k=v&k2=v2`)
	///
	/// Values are percent-encoded; only filter parameters are emitted.
	pub fn to_query_string(&self) -> String {
		self.filters
			.iter()
			.map(|filter| format!("{}={}", filter.key, encode_value(filter.value.submitted())))
			.collect::<Vec<_>>()
			.join("&")
	}

	/// Active value for `key`
	pub fn get(&self, key: &str) -> Option<&ActiveValue> {
		self.filters
			.iter()
			.find(|filter| filter.key == key)
			.map(|filter| &filter.value)
	}

	/// Submitted string for `key`
	pub fn value(&self, key: &str) -> Option<&str> {
		self.get(key).map(ActiveValue::submitted)
	}

	/// Whether `key` is active
	pub fn is_active(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Submitted value for `key`, cleaned up for display
	///
	/// Storage keeps the raw value; this strips markup and control
	/// characters and trims surrounding whitespace.
	pub fn display_value(&self, key: &str) -> Option<String> {
		self.value(key).map(sanitize_for_display)
	}

	/// Iterate `(key, value)` pairs in schema order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ActiveValue)> {
		self.filters
			.iter()
			.map(|filter| (filter.key.as_str(), &filter.value))
	}

	/// Number of active filters
	pub fn len(&self) -> usize {
		self.filters.len()
	}

	/// Whether no filter is active
	pub fn is_empty(&self) -> bool {
		self.filters.is_empty()
	}

	/// Copy of this state with `definition` set to `submitted`
	///
	/// `position` is the definition's schema position; the copy stays in
	/// schema order. Unset values remove the filter instead.
	pub fn with_value(&self, definition: &FilterDefinition, position: usize, submitted: &str) -> Self {
		let mut next = self.without(&definition.key);
		if is_unset(submitted) {
			return next;
		}
		let at = next
			.filters
			.iter()
			.position(|filter| filter.position > position)
			.unwrap_or(next.filters.len());
		next.filters.insert(
			at,
			ActiveFilter {
				key: definition.key.clone(),
				position,
				value: ActiveValue::for_kind(definition.control_kind, submitted),
			},
		);
		next
	}

	/// Copy of this state with `key` removed
	pub fn without(&self, key: &str) -> Self {
		Self {
			filters: self
				.filters
				.iter()
				.filter(|filter| filter.key != key)
				.cloned()
				.collect(),
		}
	}
}

/// Whether `next` after a `<` opens a tag, closing tag, comment or doctype
fn opens_tag(next: Option<&char>) -> bool {
	next.is_some_and(|ch| ch.is_ascii_alphabetic() || *ch == '/' || *ch == '!')
}

/// Strip markup and control characters, then trim
///
/// Quotes inside a tag are honoured, so `>` in an attribute value does not
/// end the tag. A `<` that cannot open a tag (as in `<3`) is kept as text.
fn sanitize_for_display(raw: &str) -> String {
	let chars: Vec<char> = raw.chars().collect();
	let len = chars.len();
	let mut cleaned = String::with_capacity(raw.len());
	let mut i = 0;

	while i < len {
		let ch = chars[i];
		if ch == '<' && opens_tag(chars.get(i + 1)) {
			if chars[i + 1..].starts_with(&['!', '-', '-']) {
				i += 4;
				while i < len && !chars[i..].starts_with(&['-', '-', '>']) {
					i += 1;
				}
				i = (i + 3).min(len);
				continue;
			}

			i += 1;
			let mut in_single_quote = false;
			let mut in_double_quote = false;
			while i < len {
				match chars[i] {
					'"' if !in_single_quote => in_double_quote = !in_double_quote,
					'\'' if !in_double_quote => in_single_quote = !in_single_quote,
					'>' if !in_single_quote && !in_double_quote => {
						i += 1;
						break;
					}
					_ => {}
				}
				i += 1;
			}
			continue;
		}

		if !ch.is_control() {
			cleaned.push(ch);
		}
		i += 1;
	}

	cleaned.trim().to_string()
}
