//! Listing excerpts
//!
//! Short plain-text summary stored as the excerpt of imported listings.

use crate::listing::{ListingAttributes, non_blank};

const EXCERPT_SPECIALIZATIONS: usize = 5;
const EXCERPT_INSURERS: usize = 3;

fn offers_telehealth(value: &str) -> bool {
	!matches!(value.trim(), "" | "No" | "Unknown")
}

/// Build the excerpt for `listing`
///
/// Sentences are emitted in a fixed order and skipped when their data is
/// missing: introduction, specializations, insurance, telehealth, new
/// patients.
///
/// # Examples
///
/// ```
/// use therapist_index_seo::{ListingAttributes, excerpt_for};
///
/// let listing = ListingAttributes::new("Jane Doe")
///     .with_license_type("LCSW-C")
///     .with_location("Bethesda", "MD")
///     .with_insurance_csv("Aetna, Cigna, CareFirst, Medicare")
///     .with_telehealth("Yes");
///
/// assert_eq!(
///     excerpt_for(&listing),
///     "Jane Doe (LCSW-C) in Bethesda, MD. Accepts Aetna, Cigna, CareFirst and 1 more. Telehealth available."
/// );
/// ```
pub fn excerpt_for(listing: &ListingAttributes) -> String {
	let mut sentences = Vec::new();

	if let Some(name) = listing.display_name() {
		let mut intro = name.to_string();
		if let Some(license) = non_blank(&listing.license_type) {
			intro.push_str(&format!(" ({})", license));
		}
		if let Some(location) = listing.location() {
			intro.push_str(&format!(" in {}", location));
		}
		intro.push('.');
		sentences.push(intro);
	}

	let specializations: Vec<&str> = listing
		.specialization_tags()
		.take(EXCERPT_SPECIALIZATIONS)
		.collect();
	if !specializations.is_empty() {
		sentences.push(format!("Specializes in {}.", specializations.join(", ")));
	}

	let insurers: Vec<&str> = listing
		.insurance
		.iter()
		.map(|carrier| carrier.trim())
		.filter(|carrier| !carrier.is_empty())
		.collect();
	if !insurers.is_empty() {
		let shown = insurers.len().min(EXCERPT_INSURERS);
		let mut accepts = insurers[..shown].join(", ");
		let remaining = insurers.len() - shown;
		if remaining > 0 {
			accepts.push_str(&format!(" and {} more", remaining));
		}
		sentences.push(format!("Accepts {}.", accepts));
	}

	if offers_telehealth(&listing.telehealth) {
		sentences.push("Telehealth available.".to_string());
	}

	if listing.accepting_new_patients.trim() == "Yes" {
		sentences.push("Currently accepting new patients.".to_string());
	}

	sentences.join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_full_excerpt() {
		let listing = ListingAttributes::new("Jane Doe")
			.with_license_type("LCPC")
			.with_location("Bethesda", "MD")
			.with_specializations_csv("Anxiety, Depression, Grief, OCD, ADHD, Trauma")
			.with_insurance_csv("Aetna, Cigna")
			.with_telehealth("Yes")
			.with_accepting_new_patients("Yes");

		assert_eq!(
			excerpt_for(&listing),
			"Jane Doe (LCPC) in Bethesda, MD. \
			 Specializes in Anxiety, Depression, Grief, OCD, ADHD. \
			 Accepts Aetna, Cigna. \
			 Telehealth available. \
			 Currently accepting new patients."
		);
	}

	#[rstest]
	#[case("Yes", true)]
	#[case("Video only", true)]
	#[case("No", false)]
	#[case("Unknown", false)]
	#[case("", false)]
	fn test_telehealth_sentence(#[case] telehealth: &str, #[case] expected: bool) {
		let listing = ListingAttributes::new("Jane Doe").with_telehealth(telehealth);
		assert_eq!(excerpt_for(&listing).contains("Telehealth available."), expected);
	}

	#[rstest]
	fn test_nameless_listing_skips_intro() {
		let listing = ListingAttributes::default()
			.with_location("Bethesda", "MD")
			.with_accepting_new_patients("Yes");
		assert_eq!(excerpt_for(&listing), "Currently accepting new patients.");
	}

	#[rstest]
	fn test_empty_listing() {
		assert_eq!(excerpt_for(&ListingAttributes::default()), "");
	}
}
