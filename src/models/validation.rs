use crate::error::{NameKind, Result, TodoError};

use super::list::{ListId, TodoList};

/// Longest accepted list or todo name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Trim `candidate` and check its length. Returns the trimmed name.
fn checked_length(candidate: &str, kind: NameKind) -> Result<String> {
    let name = candidate.trim();
    let len = name.chars().count();
    if (1..=MAX_NAME_LEN).contains(&len) {
        Ok(name.to_string())
    } else {
        Err(TodoError::TooShortOrLong(kind))
    }
}

/// Validate a list name against its siblings.
///
/// Length is checked before uniqueness. `excluding` names the list being
/// renamed so that keeping its current name is not a duplicate. Comparison is
/// case-sensitive and applies to the trimmed name.
pub fn validate_list_name(
    candidate: &str,
    existing: &[TodoList],
    excluding: Option<ListId>,
) -> Result<String> {
    let name = checked_length(candidate, NameKind::List)?;

    let duplicate = existing
        .iter()
        .filter(|list| Some(list.id) != excluding)
        .any(|list| list.name == name);
    if duplicate {
        return Err(TodoError::DuplicateName);
    }

    Ok(name)
}

/// Validate a todo name. Todo names are not required to be unique.
pub fn validate_todo_name(candidate: &str) -> Result<String> {
    checked_length(candidate, NameKind::Todo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(id: ListId, name: &str) -> TodoList {
        TodoList::new(id, name)
    }

    #[test]
    fn rejects_empty_and_blank_names() {
        assert_eq!(
            validate_list_name("", &[], None),
            Err(TodoError::TooShortOrLong(NameKind::List))
        );
        assert_eq!(
            validate_todo_name("   "),
            Err(TodoError::TooShortOrLong(NameKind::Todo))
        );
    }

    #[test]
    fn accepts_boundary_lengths() {
        assert!(validate_todo_name("a").is_ok());
        assert!(validate_todo_name(&"a".repeat(100)).is_ok());
        assert!(validate_todo_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn counts_characters_not_bytes() {
        let name = "é".repeat(100);
        assert_eq!(validate_todo_name(&name), Ok(name));
    }

    #[test]
    fn returns_trimmed_name() {
        assert_eq!(
            validate_list_name("  Groceries \n", &[], None),
            Ok("Groceries".to_string())
        );
    }

    #[test]
    fn rejects_duplicate_after_trimming() {
        let lists = vec![list(1, "Groceries")];
        assert_eq!(
            validate_list_name(" Groceries ", &lists, None),
            Err(TodoError::DuplicateName)
        );
    }

    #[test]
    fn duplicate_check_is_case_sensitive() {
        let lists = vec![list(1, "Groceries")];
        assert!(validate_list_name("groceries", &lists, None).is_ok());
    }

    #[test]
    fn excluded_list_may_keep_its_name() {
        let lists = vec![list(1, "Groceries"), list(2, "Chores")];
        assert!(validate_list_name("Groceries", &lists, Some(1)).is_ok());
        assert_eq!(
            validate_list_name("Chores", &lists, Some(1)),
            Err(TodoError::DuplicateName)
        );
    }

    #[test]
    fn length_is_checked_before_uniqueness() {
        let long = "x".repeat(101);
        let lists = vec![list(1, &long)];
        assert_eq!(
            validate_list_name(&long, &lists, None),
            Err(TodoError::TooShortOrLong(NameKind::List))
        );
    }
}
