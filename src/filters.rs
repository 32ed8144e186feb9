//! Listing filters
//!
//! # Examples
//!
//! ```
//! use therapist_index::filters::{FilterSchema, strip_filters};
//!
//! let schema = FilterSchema::therapist_directory();
//! assert_eq!(strip_filters("/therapists/?gender=Male", &schema), "/therapists/");
//! ```

pub use therapist_index_filters::*;
