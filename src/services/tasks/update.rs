//! Partial-update construction.
//!
//! A `TaskPatch` is the sparse edit set sent by the client. Each field is tri-state:
//! - `None`: key absent (field untouched)
//! - `Some(None)`: key present with `null`
//! - `Some(Some(v))`: key present with a value
//!
//! Presence alone decides inclusion. Unknown keys are dropped by deserialization.
use serde::{Deserialize, Deserializer};

use crate::models::{Assignment, UpdateInstruction};

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub completed: Option<Option<bool>>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub priority: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Option<String>>,
}

// Any value for a present key, `null` included, becomes `Some(..)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

type Setter = fn(&TaskPatch) -> Option<Assignment>;

// Declared order is the order of the produced instruction.
const SETTERS: [Setter; 5] = [
    set_description,
    set_completed,
    set_due_date,
    set_priority,
    set_category,
];

// null description falls back to the creation default
fn set_description(patch: &TaskPatch) -> Option<Assignment> {
    patch
        .description
        .clone()
        .map(|v| Assignment::Description(v.unwrap_or_default()))
}

fn set_completed(patch: &TaskPatch) -> Option<Assignment> {
    patch
        .completed
        .map(|v| Assignment::Completed(v.unwrap_or(false)))
}

fn set_due_date(patch: &TaskPatch) -> Option<Assignment> {
    patch.due_date.clone().map(Assignment::DueDate)
}

fn set_priority(patch: &TaskPatch) -> Option<Assignment> {
    patch.priority.clone().map(Assignment::Priority)
}

fn set_category(patch: &TaskPatch) -> Option<Assignment> {
    patch.category.clone().map(Assignment::Category)
}

/// `None` when the patch names no recognized field.
pub fn build_update(patch: &TaskPatch) -> Option<UpdateInstruction> {
    let assignments = SETTERS.iter().filter_map(|setter| setter(patch)).collect();
    UpdateInstruction::from_assignments(assignments)
}
