use serde::{Deserialize, Serialize};

/// Identifier of a todo, unique within its parent list.
pub type TodoId = u64;

/// A single task belonging to exactly one [`super::TodoList`].
///
/// Todos move between incomplete and completed only through an explicit
/// toggle or a list-wide complete-all. Names need not be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    pub fn new(id: TodoId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }
}
