/*
 * Responsibility
 * - Task エンティティ (wire 形式は camelCase)
 * - UpdateInstruction: 1 レコードに対する (field, value) の順序付きリスト
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    // assigned once at creation, never supplied by the caller
    pub id: Uuid,
    pub description: String,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub completed: bool,
}

impl Task {
    pub fn new(
        description: String,
        due_date: Option<String>,
        priority: Option<String>,
        category: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description,
            due_date,
            priority,
            category,
            completed: false,
        }
    }

    pub fn apply(&mut self, instruction: &UpdateInstruction) {
        for assignment in instruction.assignments() {
            match assignment {
                Assignment::Description(v) => self.description = v.clone(),
                Assignment::Completed(v) => self.completed = *v,
                Assignment::DueDate(v) => self.due_date = v.clone(),
                Assignment::Priority(v) => self.priority = v.clone(),
                Assignment::Category(v) => self.category = v.clone(),
            }
        }
    }
}

/// Mutable fields, in the order instructions are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    Description,
    Completed,
    DueDate,
    Priority,
    Category,
}

impl TaskField {
    /// Name used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Completed => "completed",
            Self::DueDate => "dueDate",
            Self::Priority => "priority",
            Self::Category => "category",
        }
    }

    /// Column in the `tasks` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Completed => "completed",
            Self::DueDate => "due_date",
            Self::Priority => "priority",
            Self::Category => "category",
        }
    }
}

/// One (field, bound value) pair. The variant fixes the value type per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    Description(String),
    Completed(bool),
    DueDate(Option<String>),
    Priority(Option<String>),
    Category(Option<String>),
}

impl Assignment {
    pub fn field(&self) -> TaskField {
        match self {
            Self::Description(_) => TaskField::Description,
            Self::Completed(_) => TaskField::Completed,
            Self::DueDate(_) => TaskField::DueDate,
            Self::Priority(_) => TaskField::Priority,
            Self::Category(_) => TaskField::Category,
        }
    }
}

/// Never empty: an empty edit set has no instruction at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateInstruction {
    assignments: Vec<Assignment>,
}

impl UpdateInstruction {
    pub(crate) fn from_assignments(assignments: Vec<Assignment>) -> Option<Self> {
        if assignments.is_empty() {
            None
        } else {
            Some(Self { assignments })
        }
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn fields(&self) -> Vec<TaskField> {
        self.assignments.iter().map(Assignment::field).collect()
    }
}
