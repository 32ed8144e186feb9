//! Listing attributes
//!
//! Read-only view of one listing as stored by the directory. The store keeps
//! multi-valued fields as comma-delimited text; [`split_list`] turns them into
//! ordered lists.

use serde::{Deserialize, Serialize};

/// Split a comma-delimited storage value into trimmed, non-empty items
///
/// # Examples
///
/// ```
/// use therapist_index_seo::split_list;
///
/// assert_eq!(split_list("Anxiety, Depression,, PTSD/Trauma "), vec!["Anxiety", "Depression", "PTSD/Trauma"]);
/// assert!(split_list("  ").is_empty());
/// ```
pub fn split_list(csv: &str) -> Vec<String> {
	csv.split(',')
		.map(str::trim)
		.filter(|item| !item.is_empty())
		.map(str::to_string)
		.collect()
}

/// Attributes of a single listing
///
/// Empty strings mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingAttributes {
	pub name: String,
	pub city: String,
	pub region: String,
	/// Ordered specialization tags
	pub specializations: Vec<String>,
	pub license_type: String,
	/// Ordered insurance carriers
	pub insurance: Vec<String>,
	pub telehealth: String,
	pub accepting_new_patients: String,
}

impl ListingAttributes {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn with_location(mut self, city: impl Into<String>, region: impl Into<String>) -> Self {
		self.city = city.into();
		self.region = region.into();
		self
	}

	pub fn with_specializations<I, S>(mut self, specializations: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.specializations = specializations.into_iter().map(Into::into).collect();
		self
	}

	/// Set specializations from their comma-delimited storage form
	pub fn with_specializations_csv(mut self, csv: &str) -> Self {
		self.specializations = split_list(csv);
		self
	}

	pub fn with_license_type(mut self, license_type: impl Into<String>) -> Self {
		self.license_type = license_type.into();
		self
	}

	/// Set insurance carriers from their comma-delimited storage form
	pub fn with_insurance_csv(mut self, csv: &str) -> Self {
		self.insurance = split_list(csv);
		self
	}

	pub fn with_telehealth(mut self, telehealth: impl Into<String>) -> Self {
		self.telehealth = telehealth.into();
		self
	}

	pub fn with_accepting_new_patients(mut self, accepting: impl Into<String>) -> Self {
		self.accepting_new_patients = accepting.into();
		self
	}

	/// Trimmed name, `None` when blank
	pub fn display_name(&self) -> Option<&str> {
		non_blank(&self.name)
	}

	/// `"city, region"`, or whichever part is present
	///
	/// Returns `None` when neither is set.
	pub fn location(&self) -> Option<String> {
		match (non_blank(&self.city), non_blank(&self.region)) {
			(Some(city), Some(region)) => Some(format!("{}, {}", city, region)),
			(Some(part), None) | (None, Some(part)) => Some(part.to_string()),
			(None, None) => None,
		}
	}

	/// Specializations trimmed with blanks removed, in stored order
	pub fn specialization_tags(&self) -> impl Iterator<Item = &str> {
		self.specializations
			.iter()
			.map(|tag| tag.trim())
			.filter(|tag| !tag.is_empty())
	}
}

pub(crate) fn non_blank(value: &str) -> Option<&str> {
	let trimmed = value.trim();
	(!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("Bethesda", "MD", Some("Bethesda, MD"))]
	#[case("Bethesda", "", Some("Bethesda"))]
	#[case("", "MD", Some("MD"))]
	#[case(" ", "  ", None)]
	fn test_location(#[case] city: &str, #[case] region: &str, #[case] expected: Option<&str>) {
		let listing = ListingAttributes::new("Jane Doe").with_location(city, region);
		assert_eq!(listing.location().as_deref(), expected);
	}

	#[rstest]
	fn test_specialization_tags_skip_blanks() {
		let listing =
			ListingAttributes::new("Jane Doe").with_specializations([" Anxiety ", "", "  ", "Grief"]);
		assert_eq!(
			listing.specialization_tags().collect::<Vec<_>>(),
			vec!["Anxiety", "Grief"]
		);
	}

	#[rstest]
	fn test_csv_builders() {
		let listing = ListingAttributes::new("Jane Doe")
			.with_specializations_csv("Anxiety, Depression")
			.with_insurance_csv("Aetna,Cigna, ");
		assert_eq!(listing.specializations, vec!["Anxiety", "Depression"]);
		assert_eq!(listing.insurance, vec!["Aetna", "Cigna"]);
	}

	#[rstest]
	fn test_deserialize_with_defaults() {
		let listing: ListingAttributes =
			serde_json::from_str(r#"{"name": "Jane Doe", "city": "Bethesda"}"#).unwrap();
		assert_eq!(listing.display_name(), Some("Jane Doe"));
		assert!(listing.specializations.is_empty());
		assert_eq!(listing.location().as_deref(), Some("Bethesda"));
	}
}
