//! Predicate compiler
//!
//! Turns an [`ActiveFilterState`] into column predicates for the listing
//! store. The compiler only describes the query; executing it, paginating and
//! ordering results belong to the store.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use therapist_index_filters::{ActiveFilterState, FilterSchema, Predicate, compile};
//!
//! let schema = FilterSchema::therapist_directory();
//! let params = HashMap::from([("telehealth".to_string(), "1".to_string())]);
//! let state = ActiveFilterState::decode(&schema, &params);
//!
//! assert_eq!(
//!     compile(&state, &schema),
//!     vec![Predicate::contains("geodir_telehealth", "Yes")]
//! );
//! ```

use crate::schema::{ControlKind, FilterSchema};
use crate::state::ActiveFilterState;
use sea_query::{
	Alias, Asterisk, Condition, ConditionalStatement, Expr, LikeExpr, PostgresQueryBuilder,
	Query, QueryStatementWriter, SimpleExpr,
};
use serde::{Deserialize, Serialize};

/// Comparison applied by a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredicateOperator {
	/// Column contains the literal (`LIKE '%literal%'`)
	Contains,
	/// Column equals the literal
	Equals,
}

/// A single compiled column condition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
	pub column: String,
	pub operator: PredicateOperator,
	pub literal: String,
}

impl Predicate {
	pub fn new(
		column: impl Into<String>,
		operator: PredicateOperator,
		literal: impl Into<String>,
	) -> Self {
		Self {
			column: column.into(),
			operator,
			literal: literal.into(),
		}
	}

	pub fn contains(column: impl Into<String>, literal: impl Into<String>) -> Self {
		Self::new(column, PredicateOperator::Contains, literal)
	}

	pub fn equals(column: impl Into<String>, literal: impl Into<String>) -> Self {
		Self::new(column, PredicateOperator::Equals, literal)
	}

	/// Build the `sea-query` expression for this predicate
	///
	/// `contains` escapes `%`, `_` and `\` in the literal so user input never
	/// acts as a LIKE wildcard.
	pub fn to_expr(&self) -> SimpleExpr {
		let column = Expr::col(Alias::new(self.column.as_str()));
		match self.operator {
			PredicateOperator::Contains => {
				let pattern = format!("%{}%", escape_like_pattern(&self.literal));
				column.like(LikeExpr::new(pattern).escape('\\'))
			}
			PredicateOperator::Equals => column.eq(self.literal.clone()),
		}
	}
}

/// Escape special characters of SQL LIKE patterns
fn escape_like_pattern(pattern: &str) -> String {
	pattern
		.replace('\\', "\\\\")
		.replace('%', "\\%")
		.replace('_', "\\_")
}

/// Compile active filters into predicates, in schema order
///
/// Toggles search for their fixed value, never for the submitted marker.
/// Select values are searched trimmed, matching the rule decode uses to
/// decide whether a value is set. Inactive filters contribute nothing.
pub fn compile(state: &ActiveFilterState, schema: &FilterSchema) -> Vec<Predicate> {
	let predicates: Vec<Predicate> = schema
		.iter()
		.filter_map(|definition| {
			let value = state.get(&definition.key)?;
			let literal = match (&definition.control_kind, &definition.fixed_search_value) {
				(ControlKind::BooleanToggle, Some(fixed)) => fixed.clone(),
				_ => value.submitted().trim().to_string(),
			};
			Some(Predicate::new(
				definition.column.clone(),
				definition.match_strategy.operator(),
				literal,
			))
		})
		.collect();

	tracing::debug!(predicates = predicates.len(), "Compiled filter predicates");
	predicates
}

/// Base store condition with compiled predicates appended
///
/// The base condition (usually the listing category scope) always comes
/// first and is never replaced; predicates follow in the order they were
/// appended.
///
/// # Examples
///
/// ```
/// use therapist_index_filters::{ListingQuery, Predicate};
///
/// let query = ListingQuery::scoped_to("post_type", "gd_place")
///     .with_predicates(vec![Predicate::equals("geodir_gender", "Female")]);
///
/// let sql = query.to_sql("listings");
/// assert!(sql.starts_with(r#"SELECT * FROM "listings" WHERE"#));
/// assert!(sql.contains(r#""geodir_gender" = 'Female'"#));
/// ```
#[derive(Debug, Clone)]
pub struct ListingQuery {
	base: Condition,
	predicates: Vec<Predicate>,
}

impl ListingQuery {
	/// Start from an arbitrary base condition
	pub fn new(base: Condition) -> Self {
		Self {
			base,
			predicates: Vec::new(),
		}
	}

	/// Start from `column = value`
	pub fn scoped_to(column: &str, value: &str) -> Self {
		Self::new(Condition::all().add(Expr::col(Alias::new(column)).eq(value.to_string())))
	}

	/// Append predicates after those already present
	pub fn with_predicates(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Self {
		self.predicates.extend(predicates);
		self
	}

	pub fn predicates(&self) -> &[Predicate] {
		&self.predicates
	}

	/// Conjunction of the base condition and every predicate
	pub fn condition(&self) -> Condition {
		self.predicates
			.iter()
			.fold(Condition::all().add(self.base.clone()), |condition, predicate| {
				condition.add(predicate.to_expr())
			})
	}

	/// Render a `SELECT *` over `table` (PostgreSQL dialect)
	pub fn to_sql(&self, table: &str) -> String {
		Query::select()
			.column(Asterisk)
			.from(Alias::new(table))
			.cond_where(self.condition())
			.to_string(PostgresQueryBuilder)
	}
}
