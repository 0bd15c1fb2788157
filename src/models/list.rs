use serde::{Deserialize, Serialize};

use crate::error::{Result, TodoError};

use super::ordering::order_for_display;
use super::todo::{Todo, TodoId};
use super::validation::{validate_list_name, validate_todo_name};

/// Identifier of a list, unique within its [`ListCollection`].
pub type ListId = u64;

/// A named, ordered collection of todos.
///
/// `todos` is kept in insertion order. Whether the list is complete is always
/// derived from its todos and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub todos: Vec<Todo>,
    /// Next identifier handed to a new todo. Never reused after a delete.
    #[serde(default)]
    next_todo_id: TodoId,
}

fn first_id() -> u64 {
    1
}

/// Next free id: the stored counter, but never at or below an id in use.
fn next_free_id(counter: u64, ids: impl Iterator<Item = u64>) -> u64 {
    let after_max = ids.max().map_or(first_id(), |max| max + 1);
    counter.max(after_max)
}

impl TodoList {
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            todos: Vec::new(),
            next_todo_id: first_id(),
        }
    }

    pub fn todo(&self, todo_id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == todo_id)
    }

    fn todo_mut(&mut self, todo_id: TodoId) -> Result<&mut Todo> {
        self.todos
            .iter_mut()
            .find(|todo| todo.id == todo_id)
            .ok_or(TodoError::TodoNotFound)
    }

    /// Append a new incomplete todo after validating its name.
    pub fn add_todo(&mut self, name: &str) -> Result<&Todo> {
        let name = validate_todo_name(name)?;
        let id = next_free_id(self.next_todo_id, self.todos.iter().map(|todo| todo.id));
        self.next_todo_id = id + 1;
        self.todos.push(Todo::new(id, name));
        Ok(&self.todos[self.todos.len() - 1])
    }

    /// Set a todo's completion flag to `completed`.
    pub fn toggle_todo(&mut self, todo_id: TodoId, completed: bool) -> Result<&Todo> {
        let todo = self.todo_mut(todo_id)?;
        todo.completed = completed;
        Ok(todo)
    }

    /// Remove a todo, returning it.
    pub fn delete_todo(&mut self, todo_id: TodoId) -> Result<Todo> {
        let index = self
            .todos
            .iter()
            .position(|todo| todo.id == todo_id)
            .ok_or(TodoError::TodoNotFound)?;
        Ok(self.todos.remove(index))
    }

    /// Mark every todo completed. A list without todos is left as is.
    pub fn complete_all(&mut self) {
        for todo in &mut self.todos {
            todo.completed = true;
        }
    }

    /// True when the list has at least one todo and all of them are completed.
    pub fn is_complete(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|todo| todo.completed)
    }

    /// `(completed, total)` todo counts.
    pub fn completion_status(&self) -> (usize, usize) {
        let completed = self.todos.iter().filter(|todo| todo.completed).count();
        (completed, self.todos.len())
    }

    pub fn remaining_count(&self) -> usize {
        let (completed, total) = self.completion_status();
        total - completed
    }

    /// Todos with incomplete ones first, for rendering.
    pub fn todos_for_display(&self) -> Vec<&Todo> {
        order_for_display(&self.todos, |todo| todo.completed)
    }
}

/// All lists held by one session, in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCollection {
    #[serde(default)]
    lists: Vec<TodoList>,
    #[serde(default)]
    next_id: ListId,
}

impl Default for ListCollection {
    fn default() -> Self {
        Self {
            lists: Vec::new(),
            next_id: first_id(),
        }
    }
}

impl ListCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TodoList> {
        self.lists.iter()
    }

    pub fn get(&self, id: ListId) -> Option<&TodoList> {
        self.lists.iter().find(|list| list.id == id)
    }

    pub fn get_mut(&mut self, id: ListId) -> Option<&mut TodoList> {
        self.lists.iter_mut().find(|list| list.id == id)
    }

    /// Look up a list, failing with [`TodoError::ListNotFound`].
    pub fn find_mut(&mut self, id: ListId) -> Result<&mut TodoList> {
        self.get_mut(id).ok_or(TodoError::ListNotFound)
    }

    /// Append a new, empty list after validating its name.
    pub fn create_list(&mut self, name: &str) -> Result<&TodoList> {
        let name = validate_list_name(name, &self.lists, None)?;
        let id = next_free_id(self.next_id, self.lists.iter().map(|list| list.id));
        self.next_id = id + 1;
        self.lists.push(TodoList::new(id, name));
        Ok(&self.lists[self.lists.len() - 1])
    }

    /// Rename a list. Keeping the current name is allowed.
    pub fn rename_list(&mut self, id: ListId, new_name: &str) -> Result<&TodoList> {
        if self.get(id).is_none() {
            return Err(TodoError::ListNotFound);
        }
        let name = validate_list_name(new_name, &self.lists, Some(id))?;
        let list = self.find_mut(id)?;
        list.name = name;
        Ok(list)
    }

    /// Remove a list, returning it.
    pub fn delete_list(&mut self, id: ListId) -> Result<TodoList> {
        let index = self
            .lists
            .iter()
            .position(|list| list.id == id)
            .ok_or(TodoError::ListNotFound)?;
        Ok(self.lists.remove(index))
    }

    /// Lists with incomplete ones first, for rendering.
    pub fn lists_for_display(&self) -> Vec<&TodoList> {
        order_for_display(&self.lists, TodoList::is_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NameKind;

    #[test]
    fn todo_ids_are_not_reused_after_delete() {
        let mut list = TodoList::new(1, "Chores");
        list.add_todo("a").unwrap();
        let second = list.add_todo("b").unwrap().id;
        list.delete_todo(second).unwrap();
        let third = list.add_todo("c").unwrap().id;
        assert_ne!(second, third);
        assert_eq!(third, 3);
    }

    #[test]
    fn list_ids_are_not_reused_after_delete() {
        let mut lists = ListCollection::new();
        lists.create_list("One").unwrap();
        let two = lists.create_list("Two").unwrap().id;
        lists.delete_list(two).unwrap();
        assert_eq!(lists.create_list("Three").unwrap().id, 3);
    }

    #[test]
    fn ids_continue_after_existing_ones_when_counters_are_missing() {
        let stored = r#"{
            "lists": [
                { "id": 4, "name": "Chores", "todos": [
                    { "id": 2, "name": "Sweep", "completed": false },
                    { "id": 7, "name": "Mop", "completed": true }
                ] }
            ]
        }"#;
        let mut lists: ListCollection = serde_json::from_str(stored).unwrap();

        let list_id = lists.create_list("Groceries").unwrap().id;
        assert_eq!(list_id, 5);

        let todo_id = lists.find_mut(4).unwrap().add_todo("Dust").unwrap().id;
        assert_eq!(todo_id, 8);
    }

    #[test]
    fn failed_add_leaves_todos_untouched() {
        let mut list = TodoList::new(1, "Chores");
        list.add_todo("Sweep").unwrap();
        let before = list.clone();
        assert_eq!(
            list.add_todo(""),
            Err(TodoError::TooShortOrLong(NameKind::Todo))
        );
        assert_eq!(list, before);
    }

    #[test]
    fn rename_of_missing_list_is_not_found() {
        let mut lists = ListCollection::new();
        assert_eq!(lists.rename_list(7, "x"), Err(TodoError::ListNotFound));
    }

    #[test]
    fn rename_stores_trimmed_name() {
        let mut lists = ListCollection::new();
        let id = lists.create_list("Old").unwrap().id;
        lists.rename_list(id, "  New  ").unwrap();
        assert_eq!(lists.get(id).unwrap().name, "New");
    }

    #[test]
    fn remaining_count_tracks_incomplete_todos() {
        let mut list = TodoList::new(1, "Chores");
        let a = list.add_todo("a").unwrap().id;
        list.add_todo("b").unwrap();
        list.toggle_todo(a, true).unwrap();
        assert_eq!(list.remaining_count(), 1);
        assert_eq!(list.completion_status(), (1, 2));
    }

    #[test]
    fn display_order_does_not_change_stored_order() {
        let mut lists = ListCollection::new();
        let done = lists.create_list("Done").unwrap().id;
        lists.create_list("Open").unwrap();
        let list = lists.find_mut(done).unwrap();
        let todo = list.add_todo("x").unwrap().id;
        list.toggle_todo(todo, true).unwrap();

        let shown: Vec<&str> = lists
            .lists_for_display()
            .into_iter()
            .map(|list| list.name.as_str())
            .collect();
        assert_eq!(shown, vec!["Open", "Done"]);

        let stored: Vec<&str> = lists.iter().map(|list| list.name.as_str()).collect();
        assert_eq!(stored, vec!["Done", "Open"]);
    }
}
