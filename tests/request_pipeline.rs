//! Request pipeline tests
//!
//! Drives a configured directory through a full listing request: decode,
//! query, filter bar, pagination and page metadata.

use rstest::*;
use therapist_index::prelude::*;
use therapist_index::filters::Predicate;

#[fixture]
fn directory() -> Directory {
	Directory::from_settings(Settings::default()).unwrap()
}

#[fixture]
fn jane() -> ListingAttributes {
	ListingAttributes::new("Jane Doe")
		.with_location("Bethesda", "MD")
		.with_specializations_csv("Anxiety, Depression, PTSD/Trauma")
}

/// Test: a listing request from raw query string to SQL
///
/// Category: Use Case
#[rstest]
fn test_listing_request(directory: Directory) {
	let ctx = directory.context(RequestParams::from_query(
		"?s=anxiety&insurance=Blue+Cross&gender=0&telehealth=1&paged=2",
	));

	assert_eq!(ctx.params().get("s"), Some("anxiety"));
	assert_eq!(ctx.state().len(), 2);
	assert_eq!(ctx.state().value("insurance"), Some("Blue Cross"));

	let query = directory.listing_query(&ctx);
	assert_eq!(
		query.predicates(),
		&[
			Predicate::contains("geodir_insurance_accepted", "Blue Cross"),
			Predicate::contains("geodir_telehealth", "Yes"),
		]
	);

	let sql = directory.listing_sql(&ctx);
	assert!(sql.starts_with(r#"SELECT * FROM "listings" WHERE"#));
	assert!(sql.contains(r#""post_type" = 'gd_place'"#));
}

/// Test: last duplicate parameter wins
///
/// Category: Edge Case
#[rstest]
fn test_duplicate_params(directory: Directory) {
	let ctx = directory.context(RequestParams::from_query("gender=Male&gender=Female"));
	assert_eq!(ctx.state().value("gender"), Some("Female"));
}

/// Test: links keep, replace and clear filter state
///
/// Category: Use Case
#[rstest]
fn test_links(directory: Directory) {
	let ctx = directory.context(
		[("language", "Spanish & English"), ("accepting", "1")]
			.into_iter()
			.collect(),
	);

	assert_eq!(
		directory.paginate_link(&ctx, "https://example.com/therapists/page/2/?language=French"),
		"https://example.com/therapists/page/2/?language=Spanish%20%26%20English&accepting=1"
	);
	assert_eq!(
		directory.clear_filters_link("/therapists/?language=Spanish&s=ocd&accepting=1"),
		"/therapists/?s=ocd"
	);

	let empty = directory.context(RequestParams::new());
	assert_eq!(
		directory.paginate_link(&empty, "/therapists/page/2/?s=ocd"),
		"/therapists/page/2/?s=ocd"
	);
}

/// Test: the filter bar keeps other filters on every option link
///
/// Category: Use Case
#[rstest]
fn test_filter_controls(directory: Directory) {
	let ctx = directory.context(RequestParams::from_query("gender=Female&telehealth=1"));
	let controls = directory.filter_controls(&ctx, "/therapists/?gender=Female&telehealth=1");

	let keys: Vec<&str> = controls.iter().map(|c| c.key.as_str()).collect();
	assert_eq!(
		keys,
		vec![
			"insurance",
			"specialization",
			"license_type",
			"gender",
			"language",
			"telehealth",
			"accepting",
			"sliding_scale"
		]
	);

	let gender = &controls[3];
	assert!(gender.active);
	assert_eq!(gender.clear_url, "/therapists/?telehealth=1");

	let sliding = &controls[7];
	assert_eq!(sliding.kind, ControlKind::BooleanToggle);
	assert!(!sliding.active);
	assert_eq!(
		sliding.options[0].url,
		"/therapists/?gender=Female&telehealth=1&sliding_scale=1"
	);
}

/// Test: metadata is rewritten only for listing pages
///
/// Category: Decision Table
#[rstest]
#[case("gd_place", "Jane Doe — Anxiety & Depression Therapist in Bethesda, MD | Therapist Index")]
#[case("page", "Original")]
#[case("post", "Original")]
fn test_document_title_by_post_type(
	directory: Directory,
	jane: ListingAttributes,
	#[case] post_type: &str,
	#[case] expected: &str,
) {
	assert_eq!(directory.document_title(post_type, &jane, "Original"), expected);
}

/// Test: both description hooks produce the same text
///
/// Category: Sanity
#[rstest]
fn test_descriptions(directory: Directory, jane: ListingAttributes) {
	let description = directory.meta_description("gd_place", &jane, "");
	assert_eq!(
		description,
		"Jane Doe specializes in Anxiety, Depression & PTSD/Trauma therapy in Bethesda, MD. \
		 View insurance, availability, contact info & more on Therapist Index."
	);
	assert_eq!(directory.social_description("gd_place", &jane, ""), description);
	assert_eq!(directory.social_description("page", &jane, "og"), "og");
}

/// Test: site name and post type come from settings
///
/// Category: Happy Path
#[rstest]
fn test_custom_settings() {
	let settings = Settings::from_toml_str(
		r#"
site_name = "Shrink Finder"
listing_post_type = "gd_therapist"
listing_table = "therapists"
"#,
	)
	.unwrap();
	let directory = Directory::from_settings(settings).unwrap();
	let listing = ListingAttributes::new("Jane Doe");

	assert_eq!(
		directory.document_title("gd_therapist", &listing, "x"),
		"Jane Doe | Shrink Finder"
	);
	assert_eq!(directory.document_title("gd_place", &listing, "x"), "x");

	let ctx = directory.context(RequestParams::new());
	assert!(directory.listing_sql(&ctx).contains(r#"FROM "therapists""#));
}

/// Test: an invalid schema stops the directory from starting
///
/// Category: Error Path
#[rstest]
fn test_invalid_schema_refuses_to_start() {
	let mut settings = Settings::default();
	settings.filters = Some(vec![
		FilterDefinition::select("gender", "Gender", "geodir_gender", MatchStrategy::Exact),
		FilterDefinition::select("gender", "Gender", "geodir_gender", MatchStrategy::Exact),
	]);

	assert!(matches!(
		Directory::from_settings(settings),
		Err(SettingsError::Schema(SchemaError::DuplicateKey(_)))
	));
}

/// Test: controls serialize for the template layer
///
/// Category: Sanity
#[rstest]
fn test_controls_json(directory: Directory) {
	let ctx = directory.context(RequestParams::new());
	let json = serde_json::to_value(directory.filter_controls(&ctx, "/therapists/")).unwrap();
	assert_eq!(json[5]["key"], "telehealth");
	assert_eq!(json[5]["options"][0]["url"], "/therapists/?telehealth=1");
}
