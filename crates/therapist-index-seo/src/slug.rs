//! Listing slugs

use regex::Regex;
use std::sync::LazyLock;

// Anything other than lowercase ASCII letters, digits, whitespace or hyphens.
static DISALLOWED: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("DISALLOWED: invalid regex pattern"));

static WHITESPACE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE: invalid regex pattern"));

static HYPHENS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"-+").expect("HYPHENS: invalid regex pattern"));

fn slug_part(part: &str) -> String {
	let lowered = part.trim().to_lowercase();
	let cleaned = DISALLOWED.replace_all(&lowered, "");
	let hyphenated = WHITESPACE.replace_all(&cleaned, "-");
	HYPHENS
		.replace_all(&hyphenated, "-")
		.trim_matches('-')
		.to_string()
}

/// URL slug for a listing, e.g. `jane-doe-bethesda-md`
///
/// Parts that clean up to nothing are skipped.
///
/// # Examples
///
/// ```
/// use therapist_index_seo::slug_for;
///
/// assert_eq!(slug_for("Jane Doe", "Bethesda", "MD"), "jane-doe-bethesda-md");
/// assert_eq!(slug_for("Dr. Ana María O'Neil, LCSW", "", "DC"), "dr-ana-mara-oneil-lcsw-dc");
/// ```
pub fn slug_for(name: &str, city: &str, region: &str) -> String {
	[name, city, region]
		.into_iter()
		.map(slug_part)
		.filter(|part| !part.is_empty())
		.collect::<Vec<_>>()
		.join("-")
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("Jane Doe", "Bethesda", "MD", "jane-doe-bethesda-md")]
	#[case("  Jane   Doe ", "Silver Spring", "md", "jane-doe-silver-spring-md")]
	#[case("Jane -- Doe", "", "", "jane-doe")]
	#[case("!!!", "Bethesda", "MD", "bethesda-md")]
	#[case("", "", "", "")]
	fn test_slug_for(
		#[case] name: &str,
		#[case] city: &str,
		#[case] region: &str,
		#[case] expected: &str,
	) {
		assert_eq!(slug_for(name, city, region), expected);
	}
}
