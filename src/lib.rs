//! # Therapist Index
//!
//! Declarative filtering and listing metadata for a therapist directory.
//!
//! The directory renders filter controls from a schema, turns the active
//! filters of a request into predicates against the listing store, keeps
//! filter state on pagination links and derives page titles and descriptions
//! from listing attributes.
//!
//! ## Crates
//!
//! - [`filters`]: schema registry, filter state codec, predicate compiler,
//!   link rewriting and filter control view models
//! - [`seo`]: metadata templater, listing slugs and excerpts
//! - [`conf`]: settings loading and logging setup
//!
//! ## Quick Example
//!
//! ```
//! use therapist_index::prelude::*;
//!
//! let mut settings = Settings::default();
//! settings.apply_env_overrides(std::env::vars());
//! let directory = Directory::from_settings(settings)?;
//!
//! let ctx = directory.context(RequestParams::from_query("telehealth=1&s=anxiety"));
//! let query = directory.listing_query(&ctx);
//! assert_eq!(query.predicates().len(), 1);
//!
//! let listing = ListingAttributes::new("Jane Doe").with_location("Bethesda", "MD");
//! let title = directory.document_title(
//!     &directory.settings().listing_post_type,
//!     &listing,
//!     "Jane Doe",
//! );
//! assert!(title.starts_with("Jane Doe — Therapist in Bethesda, MD"));
//! # Ok::<(), SettingsError>(())
//! ```

pub mod conf;
pub mod filters;
pub mod pipeline;
pub mod seo;

pub use pipeline::{Directory, RequestContext, RequestParams};

pub use therapist_index_conf::{
	BaseCondition, LoggingSettings, Settings, SettingsError, SettingsResult, init_logging,
};
pub use therapist_index_filters::{
	ActiveFilterState, ControlKind, FilterControl, FilterDefinition, FilterOption, FilterSchema,
	ListingQuery, MatchStrategy, Predicate, SchemaError,
};
pub use therapist_index_seo::{ListingAttributes, MetadataTemplater};

pub mod prelude {
	pub use crate::{
		ActiveFilterState, ControlKind, Directory, FilterControl, FilterDefinition, FilterSchema,
		ListingAttributes, ListingQuery, MatchStrategy, MetadataTemplater, RequestContext,
		RequestParams, SchemaError, Settings, SettingsError,
	};
}
