//! # Therapist Index SEO
//!
//! Text derived from listing attributes: document titles and meta
//! descriptions for listing detail pages, plus the slug and excerpt assigned
//! to listings when they are imported.
//!
//! Everything here is a pure function of its inputs and never fails; missing
//! attributes select a shorter template instead.

pub mod excerpt;
pub mod listing;
pub mod slug;
pub mod templater;

pub use excerpt::excerpt_for;
pub use listing::{ListingAttributes, split_list};
pub use slug::slug_for;
pub use templater::{DEFAULT_SITE_NAME, MetadataTemplater};
