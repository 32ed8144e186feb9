//! # Therapist Index Filters
//!
//! Declarative filtering for the directory listing pages.
//!
//! The pipeline is a set of pure functions over one read-only
//! [`FilterSchema`]:
//!
//! - [`ActiveFilterState::decode`] turns request parameters into active filters
//! - [`compile`] turns active filters into store [`Predicate`]s, in schema order
//! - [`rewrite`] / [`strip_filters`] keep filter state on outbound links
//! - [`build_controls`] produces the render model of the filter bar
//!
//! None of these functions perform I/O or hold shared mutable state; the
//! schema is built once at startup and may be read concurrently.

pub mod controls;
pub mod error;
pub mod links;
pub mod predicate;
pub mod schema;
pub mod state;

pub use controls::{FilterControl, FilterOption, TOGGLE_ON, build_controls};
pub use error::{SchemaError, SchemaResult};
pub use links::{rewrite, strip_filters};
pub use predicate::{ListingQuery, Predicate, PredicateOperator, compile};
pub use schema::{
	ControlKind, FilterDefinition, FilterSchema, MatchStrategy, therapist_directory_definitions,
};
pub use state::{ActiveFilterState, ActiveValue, ParamSource};
