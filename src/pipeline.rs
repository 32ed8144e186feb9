//! Request pipeline
//!
//! [`Directory`] holds the process-wide, read-only state (settings, filter
//! schema, metadata templater). Each request decodes its parameters once into
//! a [`RequestContext`], and the hook functions on [`Directory`] derive the
//! listing query, filter controls, links and page metadata from it.
//!
//! # Examples
//!
//! ```
//! use therapist_index::{Directory, RequestParams, Settings};
//!
//! let directory = Directory::from_settings(Settings::default())?;
//! let ctx = directory.context(RequestParams::from_query("insurance=Aetna&paged=2"));
//!
//! assert_eq!(
//!     directory.paginate_link(&ctx, "/therapists/page/3/"),
//!     "/therapists/page/3/?insurance=Aetna"
//! );
//! assert!(directory.listing_sql(&ctx).contains("geodir_insurance_accepted"));
//! # Ok::<(), therapist_index::SettingsError>(())
//! ```

use indexmap::IndexMap;
use therapist_index_conf::{Settings, SettingsResult};
use therapist_index_filters::{
	ActiveFilterState, FilterControl, FilterSchema, ListingQuery, ParamSource, build_controls,
	compile, rewrite, strip_filters,
};
use therapist_index_seo::{ListingAttributes, MetadataTemplater};
use url::form_urlencoded;

/// Raw query parameters of one request, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
	params: IndexMap<String, String>,
}

impl RequestParams {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse a raw query string
	///
	/// A leading `?` is ignored. When a name repeats, the last value wins.
	pub fn from_query(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		form_urlencoded::parse(query.as_bytes())
			.map(|(name, value)| (name.into_owned(), value.into_owned()))
			.collect()
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.params.insert(name.into(), value.into());
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.params.len()
	}

	pub fn is_empty(&self) -> bool {
		self.params.is_empty()
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestParams {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = Self::new();
		for (name, value) in iter {
			params.insert(name, value);
		}
		params
	}
}

impl ParamSource for RequestParams {
	fn param(&self, key: &str) -> Option<&str> {
		self.get(key)
	}
}

/// Per-request context: raw parameters plus the decoded filter state
#[derive(Debug, Clone)]
pub struct RequestContext {
	params: RequestParams,
	state: ActiveFilterState,
}

impl RequestContext {
	pub fn params(&self) -> &RequestParams {
		&self.params
	}

	pub fn state(&self) -> &ActiveFilterState {
		&self.state
	}
}

/// A configured directory site
#[derive(Debug, Clone)]
pub struct Directory {
	settings: Settings,
	schema: FilterSchema,
	templater: MetadataTemplater,
}

impl Directory {
	/// Validate `settings` and build the filter schema
	///
	/// Fails when the settings or the configured filters are invalid; the
	/// site must not start in that case.
	pub fn from_settings(settings: Settings) -> SettingsResult<Self> {
		settings.validate()?;
		let schema = settings.build_schema()?;
		let templater = MetadataTemplater::new(settings.site_name.clone());
		tracing::info!(
			site = %settings.site_name,
			filters = schema.len(),
			"Directory ready"
		);
		Ok(Self {
			settings,
			schema,
			templater,
		})
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn schema(&self) -> &FilterSchema {
		&self.schema
	}

	pub fn templater(&self) -> &MetadataTemplater {
		&self.templater
	}

	/// Decode `params` once for the rest of the request
	pub fn context(&self, params: RequestParams) -> RequestContext {
		let state = ActiveFilterState::decode(&self.schema, &params);
		RequestContext { params, state }
	}

	/// Listing query scoped to the base condition, with one predicate per active filter
	pub fn listing_query(&self, ctx: &RequestContext) -> ListingQuery {
		let base = &self.settings.base_condition;
		ListingQuery::scoped_to(&base.column, &base.value)
			.with_predicates(compile(ctx.state(), &self.schema))
	}

	/// [`Directory::listing_query`] rendered against the listing table
	pub fn listing_sql(&self, ctx: &RequestContext) -> String {
		self.listing_query(ctx).to_sql(&self.settings.listing_table)
	}

	pub fn filter_controls(&self, ctx: &RequestContext, current_url: &str) -> Vec<FilterControl> {
		build_controls(&self.schema, ctx.state(), current_url)
	}

	/// Pagination link carrying the active filters
	pub fn paginate_link(&self, ctx: &RequestContext, url: &str) -> String {
		rewrite(url, ctx.state())
	}

	/// `url` with every filter parameter removed
	pub fn clear_filters_link(&self, url: &str) -> String {
		strip_filters(url, &self.schema)
	}

	fn is_listing(&self, post_type: &str) -> bool {
		post_type == self.settings.listing_post_type
	}

	/// Document title; only listing pages are rewritten
	pub fn document_title(&self, post_type: &str, listing: &ListingAttributes, input: &str) -> String {
		if !self.is_listing(post_type) {
			return input.to_string();
		}
		self.templater.title_for(listing, input)
	}

	/// Meta description; only listing pages are rewritten
	pub fn meta_description(
		&self,
		post_type: &str,
		listing: &ListingAttributes,
		input: &str,
	) -> String {
		if !self.is_listing(post_type) {
			return input.to_string();
		}
		self.templater.description_for(listing, input)
	}

	/// Social preview description; only listing pages are rewritten
	pub fn social_description(
		&self,
		post_type: &str,
		listing: &ListingAttributes,
		input: &str,
	) -> String {
		if !self.is_listing(post_type) {
			return input.to_string();
		}
		self.templater.social_description_for(listing, input)
	}
}
