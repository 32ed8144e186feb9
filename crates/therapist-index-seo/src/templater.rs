//! Metadata templater
//!
//! Derives the document title and meta description of a listing detail page
//! from its attributes. Both follow the same fallback ladder, first match
//! wins:
//!
//! 1. no name: the input string is returned unchanged
//! 2. no location: a name-only string
//! 3. location but no specializations: name and location
//! 4. both: name, specializations and location
//!
//! Titles list at most two specializations, descriptions at most three.

use crate::listing::ListingAttributes;

pub const DEFAULT_SITE_NAME: &str = "Therapist Index";

const TITLE_SPECIALIZATIONS: usize = 2;
const DESCRIPTION_SPECIALIZATIONS: usize = 3;

/// Join up to `limit` items as `"A"`, `"A & B"` or `"A, B & C"`
fn join_fragment<'a>(items: impl Iterator<Item = &'a str>, limit: usize) -> String {
	let items: Vec<&str> = items.take(limit).collect();
	match items.split_last() {
		None => String::new(),
		Some((last, [])) => last.to_string(),
		Some((last, rest)) => format!("{} & {}", rest.join(", "), last),
	}
}

/// Builds listing metadata under a site brand
///
/// # Examples
///
/// ```
/// use therapist_index_seo::{ListingAttributes, MetadataTemplater};
///
/// let templater = MetadataTemplater::default();
/// let listing = ListingAttributes::new("Jane Doe")
///     .with_location("Bethesda", "MD")
///     .with_specializations(["Anxiety", "Depression", "PTSD/Trauma"]);
///
/// assert_eq!(
///     templater.title_for(&listing, "Listing"),
///     "Jane Doe — Anxiety & Depression Therapist in Bethesda, MD | Therapist Index"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataTemplater {
	site_name: String,
}

impl Default for MetadataTemplater {
	fn default() -> Self {
		Self::new(DEFAULT_SITE_NAME)
	}
}

impl MetadataTemplater {
	pub fn new(site_name: impl Into<String>) -> Self {
		Self {
			site_name: site_name.into(),
		}
	}

	pub fn site_name(&self) -> &str {
		&self.site_name
	}

	/// Closing call to action shared by located descriptions
	pub fn call_to_action(&self) -> String {
		format!(
			"View insurance, availability, contact info & more on {}.",
			self.site_name
		)
	}

	/// Document title for `listing`, or `input` when the listing has no name
	pub fn title_for(&self, listing: &ListingAttributes, input: &str) -> String {
		let Some(name) = listing.display_name() else {
			tracing::debug!("Listing has no name, keeping title");
			return input.to_string();
		};
		let Some(location) = listing.location() else {
			return format!("{} | {}", name, self.site_name);
		};

		let specializations = join_fragment(listing.specialization_tags(), TITLE_SPECIALIZATIONS);
		if specializations.is_empty() {
			format!(
				"{} — Therapist in {} | {}",
				name, location, self.site_name
			)
		} else {
			format!(
				"{} — {} Therapist in {} | {}",
				name, specializations, location, self.site_name
			)
		}
	}

	/// Meta description for `listing`, or `input` when the listing has no name
	pub fn description_for(&self, listing: &ListingAttributes, input: &str) -> String {
		let Some(name) = listing.display_name() else {
			tracing::debug!("Listing has no name, keeping description");
			return input.to_string();
		};
		let Some(location) = listing.location() else {
			return format!(
				"{} — View specialties, insurance, availability & contact info on {}.",
				name, self.site_name
			);
		};

		let specializations =
			join_fragment(listing.specialization_tags(), DESCRIPTION_SPECIALIZATIONS);
		if specializations.is_empty() {
			format!(
				"{} is a therapist in {}. {}",
				name,
				location,
				self.call_to_action()
			)
		} else {
			format!(
				"{} specializes in {} therapy in {}. {}",
				name,
				specializations,
				location,
				self.call_to_action()
			)
		}
	}

	/// Social preview description
	///
	/// Same text as [`MetadataTemplater::description_for`]; kept as its own
	/// entry point so the two consumers can diverge later.
	pub fn social_description_for(&self, listing: &ListingAttributes, input: &str) -> String {
		self.description_for(listing, input)
	}
}
