//! Link rewriting
//!
//! Every outbound navigation link (pagination, canonical, per-option links)
//! carries the current filter state. [`rewrite`] reattaches it and
//! [`strip_filters`] builds the filter-free base link.
//!
//! Links are handled as strings rather than parsed URLs so relative links
//! survive untouched. Each non-empty query segment that is not a filter keeps
//! its original encoding byte for byte. Empty segments (`&&`, a leading or
//! trailing `&`) are dropped whenever the query is rebuilt.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use therapist_index_filters::{ActiveFilterState, FilterSchema, rewrite, strip_filters};
//!
//! let schema = FilterSchema::therapist_directory();
//! let params = HashMap::from([("insurance".to_string(), "Aetna".to_string())]);
//! let state = ActiveFilterState::decode(&schema, &params);
//!
//! assert_eq!(
//!     rewrite("/therapists/page/2/?s=anxiety", &state),
//!     "/therapists/page/2/?s=anxiety&insurance=Aetna"
//! );
//! assert_eq!(
//!     strip_filters("/therapists/?insurance=Aetna&s=anxiety", &schema),
//!     "/therapists/?s=anxiety"
//! );
//! ```

use crate::schema::FilterSchema;
use crate::state::{ActiveFilterState, encode_value};
use url::form_urlencoded;

/// A link split into its base, query and fragment
struct LinkParts<'a> {
	base: &'a str,
	query: Option<&'a str>,
	fragment: Option<&'a str>,
}

impl<'a> LinkParts<'a> {
	fn split(link: &'a str) -> Self {
		let (rest, fragment) = match link.split_once('#') {
			Some((rest, fragment)) => (rest, Some(fragment)),
			None => (link, None),
		};
		let (base, query) = match rest.split_once('?') {
			Some((base, query)) => (base, Some(query)),
			None => (rest, None),
		};
		Self {
			base,
			query,
			fragment,
		}
	}

	/// Query segments whose decoded name is not rejected by `is_dropped`
	fn kept_segments(&self, is_dropped: impl Fn(&str) -> bool) -> Vec<String> {
		self.query
			.into_iter()
			.flat_map(|query| query.split('&'))
			.filter(|segment| !segment.is_empty())
			.filter(|segment| !is_dropped(&segment_name(segment)))
			.map(str::to_string)
			.collect()
	}

	fn assemble(&self, segments: &[String]) -> String {
		let mut link = self.base.to_string();
		if !segments.is_empty() {
			link.push('?');
			link.push_str(&segments.join("&"));
		}
		if let Some(fragment) = self.fragment {
			link.push('#');
			link.push_str(fragment);
		}
		link
	}
}

/// Decoded parameter name of a `name=value` query segment
fn segment_name(segment: &str) -> String {
	form_urlencoded::parse(segment.as_bytes())
		.next()
		.map(|(name, _)| name.into_owned())
		.unwrap_or_default()
}

/// Reattach `state` to `target_url`
///
/// Non-filter parameters are preserved unchanged and in place. Filter
/// parameters already on the link are replaced by the current state, which
/// is appended in schema order. An empty state returns the link as is, and
/// rewriting twice with the same state equals rewriting once.
pub fn rewrite(target_url: &str, state: &ActiveFilterState) -> String {
	if state.is_empty() {
		return target_url.to_string();
	}

	let parts = LinkParts::split(target_url);
	let mut segments = parts.kept_segments(|name| state.is_active(name));
	segments.extend(
		state
			.encode()
			.iter()
			.map(|(key, value)| format!("{}={}", key, encode_value(value))),
	);
	parts.assemble(&segments)
}

/// Remove every filter parameter known to `schema` from `target_url`
///
/// Used to build the filter-free canonical base and "clear filters" links,
/// independent of which filters the current request has active.
pub fn strip_filters(target_url: &str, schema: &FilterSchema) -> String {
	let parts = LinkParts::split(target_url);
	if parts.query.is_none() {
		return target_url.to_string();
	}
	let segments = parts.kept_segments(|name| schema.contains_key(name));
	parts.assemble(&segments)
}
