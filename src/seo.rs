//! Listing metadata, slugs and excerpts
//!
//! # Examples
//!
//! ```
//! use therapist_index::seo::slug_for;
//!
//! assert_eq!(slug_for("Jane Doe", "Bethesda", "MD"), "jane-doe-bethesda-md");
//! ```

pub use therapist_index_seo::*;
