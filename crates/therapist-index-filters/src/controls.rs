//! Filter control view models
//!
//! Everything a template needs to render the filter bar: the control kind,
//! its label and options, whether it is active, and the links that select an
//! option or clear the filter while keeping every other active filter.

use crate::links::{rewrite, strip_filters};
use crate::schema::{ControlKind, FilterSchema};
use crate::state::ActiveFilterState;
use serde::Serialize;

/// Submitted marker used by toggle links
pub const TOGGLE_ON: &str = "1";

/// One selectable option of a control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
	pub value: String,
	pub label: String,
	pub selected: bool,
	/// Current page with this option applied
	pub url: String,
}

/// Render model for a single filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterControl {
	pub key: String,
	pub label: String,
	pub kind: ControlKind,
	pub active: bool,
	/// Submitted value when active
	pub selected: Option<String>,
	/// Options for a select; a single "on" option for a toggle
	pub options: Vec<FilterOption>,
	/// Current page without this filter
	pub clear_url: String,
}

/// Build one control per schema entry, in schema order
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use therapist_index_filters::{ActiveFilterState, FilterSchema, build_controls};
///
/// let schema = FilterSchema::therapist_directory();
/// let params = HashMap::from([("gender".to_string(), "Female".to_string())]);
/// let state = ActiveFilterState::decode(&schema, &params);
///
/// let controls = build_controls(&schema, &state, "/therapists/?gender=Female");
/// let gender = controls.iter().find(|c| c.key == "gender").unwrap();
/// assert!(gender.active);
/// assert_eq!(gender.clear_url, "/therapists/");
/// ```
pub fn build_controls(
	schema: &FilterSchema,
	state: &ActiveFilterState,
	current_url: &str,
) -> Vec<FilterControl> {
	let base = strip_filters(current_url, schema);

	schema
		.iter()
		.enumerate()
		.map(|(position, definition)| {
			let selected = state.value(&definition.key).map(str::to_string);
			let option = |value: &str, label: &str| FilterOption {
				value: value.to_string(),
				label: label.to_string(),
				selected: match definition.control_kind {
					ControlKind::SingleSelect => selected.as_deref() == Some(value),
					ControlKind::BooleanToggle => selected.is_some(),
				},
				url: rewrite(&base, &state.with_value(definition, position, value)),
			};

			let options = match definition.control_kind {
				ControlKind::SingleSelect => definition
					.options
					.iter()
					.map(|value| option(value.as_str(), value.as_str()))
					.collect(),
				ControlKind::BooleanToggle => vec![option(TOGGLE_ON, &definition.label)],
			};

			FilterControl {
				key: definition.key.clone(),
				label: definition.label.clone(),
				kind: definition.control_kind,
				active: selected.is_some(),
				selected,
				options,
				clear_url: rewrite(&base, &state.without(&definition.key)),
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::{FilterDefinition, MatchStrategy};
	use rstest::{fixture, rstest};
	use std::collections::HashMap;

	#[fixture]
	fn schema() -> FilterSchema {
		FilterSchema::new(vec![
			FilterDefinition::select(
				"insurance",
				"Insurance",
				"geodir_insurance_accepted",
				MatchStrategy::Substring,
			)
			.with_options(["Aetna", "Cigna"]),
			FilterDefinition::toggle(
				"telehealth",
				"Offers telehealth",
				"geodir_telehealth",
				MatchStrategy::Substring,
				"Yes",
			),
		])
		.unwrap()
	}

	fn decode(schema: &FilterSchema, pairs: &[(&str, &str)]) -> ActiveFilterState {
		let params: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		ActiveFilterState::decode(schema, &params)
	}

	#[rstest]
	fn test_inactive_controls(schema: FilterSchema) {
		let controls = build_controls(&schema, &ActiveFilterState::default(), "/therapists/?s=ocd");

		assert_eq!(controls.len(), 2);
		let insurance = &controls[0];
		assert!(!insurance.active);
		assert_eq!(insurance.selected, None);
		assert_eq!(insurance.clear_url, "/therapists/?s=ocd");
		assert_eq!(
			insurance.options[1],
			FilterOption {
				value: "Cigna".to_string(),
				label: "Cigna".to_string(),
				selected: false,
				url: "/therapists/?s=ocd&insurance=Cigna".to_string(),
			}
		);

		let telehealth = &controls[1];
		assert_eq!(telehealth.kind, ControlKind::BooleanToggle);
		assert_eq!(telehealth.options.len(), 1);
		assert_eq!(telehealth.options[0].url, "/therapists/?s=ocd&telehealth=1");
	}

	#[rstest]
	fn test_active_controls_keep_other_filters(schema: FilterSchema) {
		let state = decode(&schema, &[("insurance", "Aetna"), ("telehealth", "1")]);
		let controls = build_controls(
			&schema,
			&state,
			"/therapists/page/2/?insurance=Aetna&telehealth=1",
		);

		let insurance = &controls[0];
		assert!(insurance.active);
		assert_eq!(insurance.selected.as_deref(), Some("Aetna"));
		assert!(insurance.options[0].selected);
		assert!(!insurance.options[1].selected);
		assert_eq!(
			insurance.options[1].url,
			"/therapists/page/2/?insurance=Cigna&telehealth=1"
		);
		assert_eq!(insurance.clear_url, "/therapists/page/2/?telehealth=1");

		let telehealth = &controls[1];
		assert!(telehealth.options[0].selected);
		assert_eq!(telehealth.clear_url, "/therapists/page/2/?insurance=Aetna");
	}

	#[rstest]
	fn test_controls_serialize_for_templates(schema: FilterSchema) {
		let controls = build_controls(&schema, &ActiveFilterState::default(), "/therapists/");
		let json = serde_json::to_value(&controls).unwrap();
		assert_eq!(json[0]["kind"], "single-select");
		assert_eq!(json[1]["kind"], "boolean-toggle");
		assert_eq!(json[1]["active"], false);
	}
}
