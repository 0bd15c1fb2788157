//! HTML rendering for lists and todos.
//!
//! Pages are built as plain strings. Every user-supplied value goes through
//! [`escape_html`] before it reaches the output.

use std::fmt::Write;

use crate::models::{ListCollection, Todo, TodoList};
use crate::session::Flash;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap page content in the shared layout, including any status messages.
fn layout(title: &str, flash: &Flash, header: &str, content: &str) -> String {
    let mut page = String::new();
    page.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(page, "<title>{}</title>", escape_html(title));
    page.push_str("<script src=\"/javascripts/application.js\" defer></script>\n");
    page.push_str("</head>\n<body>\n<header>\n<h1>Todo Tracker</h1>\n");
    page.push_str(header);
    page.push_str("</header>\n<main>\n");

    if let Some(error) = &flash.error {
        let _ = writeln!(page, "<div class=\"flash error\"><p>{}</p></div>", escape_html(error));
    }
    if let Some(success) = &flash.success {
        let _ = writeln!(
            page,
            "<div class=\"flash success\"><p>{}</p></div>",
            escape_html(success)
        );
    }

    page.push_str(content);
    page.push_str("</main>\n</body>\n</html>\n");
    page
}

/// Overview of every list, incomplete lists first.
pub fn lists_page(lists: &ListCollection, flash: &Flash) -> String {
    let header = "<a class=\"add\" href=\"/lists/new\">New List</a>\n";

    let mut content = String::new();
    if lists.is_empty() {
        content.push_str("<p>You have no lists yet.</p>\n");
    } else {
        content.push_str("<ul id=\"lists\">\n");
        for list in lists.lists_for_display() {
            let (_, total) = list.completion_status();
            let class = if list.is_complete() { " class=\"complete\"" } else { "" };
            let _ = writeln!(
                content,
                "<li{}><a href=\"/lists/{}\"><h2>{}</h2><p>{} / {}</p></a></li>",
                class,
                list.id,
                escape_html(&list.name),
                list.remaining_count(),
                total
            );
        }
        content.push_str("</ul>\n");
    }

    layout("Lists", flash, header, &content)
}

/// Form for creating a list. `name` pre-fills the input after a failed submit.
pub fn new_list_page(name: &str, flash: &Flash) -> String {
    let header = "<a class=\"list\" href=\"/lists\">All Lists</a>\n";
    let content = format!(
        "<form action=\"/lists\" method=\"post\">\n\
         <dl><dt><label for=\"list_name\">Enter the name for your new list:</label></dt>\n\
         <dd><input name=\"list_name\" id=\"list_name\" placeholder=\"List Name\" type=\"text\" value=\"{}\"></dd></dl>\n\
         <fieldset class=\"actions\"><input type=\"submit\" value=\"Save\">\
         <a href=\"/lists\">Cancel</a></fieldset>\n</form>\n",
        escape_html(name)
    );
    layout("New List", flash, header, &content)
}

/// Rename form for a list, plus its delete button.
pub fn edit_list_page(list: &TodoList, name: &str, flash: &Flash) -> String {
    let header = format!(
        "<a class=\"list\" href=\"/lists/{}\">Back to list</a>\n",
        list.id
    );
    let content = format!(
        "<h2>Editing '{name}'</h2>\n\
         <form action=\"/lists/{id}\" method=\"post\">\n\
         <dl><dt><label for=\"list_name\">Enter the new name for the list:</label></dt>\n\
         <dd><input name=\"list_name\" id=\"list_name\" placeholder=\"List Name\" type=\"text\" value=\"{value}\"></dd></dl>\n\
         <fieldset class=\"actions\"><input type=\"submit\" value=\"Save\">\
         <a href=\"/lists/{id}\">Cancel</a></fieldset>\n</form>\n\
         <form action=\"/lists/{id}/destroy\" method=\"post\" class=\"delete\">\n\
         <button type=\"submit\">Delete List</button>\n</form>\n",
        name = escape_html(&list.name),
        id = list.id,
        value = escape_html(name),
    );
    layout("Edit List", flash, &header, &content)
}

fn todo_item(list: &TodoList, todo: &Todo) -> String {
    let (class, next) = if todo.completed {
        (" class=\"complete\"", "false")
    } else {
        ("", "true")
    };
    format!(
        "<li{class}>\n\
         <form action=\"/lists/{list_id}/todos/{todo_id}\" method=\"post\" class=\"check\">\
         <input type=\"hidden\" name=\"completed\" value=\"{next}\">\
         <button type=\"submit\">Complete</button></form>\n\
         <h3>{name}</h3>\n\
         <form action=\"/lists/{list_id}/todos/{todo_id}/destroy\" method=\"post\" class=\"delete\">\
         <button type=\"submit\">Delete</button></form>\n\
         </li>\n",
        class = class,
        list_id = list.id,
        todo_id = todo.id,
        next = next,
        name = escape_html(&todo.name),
    )
}

/// One list with its todos (incomplete first) and the add-todo form.
pub fn list_page(list: &TodoList, todo_name: &str, flash: &Flash) -> String {
    let header = "<a class=\"list\" href=\"/lists\">All Lists</a>\n";

    let mut content = String::new();
    let section_class = if list.is_complete() { " class=\"complete\"" } else { "" };
    let _ = writeln!(content, "<section id=\"todos\"{}>", section_class);
    let _ = writeln!(content, "<header><h2>{}</h2>", escape_html(&list.name));
    let _ = writeln!(
        content,
        "<p>{} remaining</p><ul>\
         <li><form action=\"/lists/{id}/complete_all\" method=\"post\">\
         <button class=\"check\" type=\"submit\">Complete All</button></form></li>\
         <li><a class=\"edit\" href=\"/lists/{id}/edit\">Edit list</a></li></ul></header>",
        list.remaining_count(),
        id = list.id
    );

    content.push_str("<ul>\n");
    for todo in list.todos_for_display() {
        content.push_str(&todo_item(list, todo));
    }
    content.push_str("</ul>\n</section>\n");

    let _ = write!(
        content,
        "<form action=\"/lists/{id}/todos\" method=\"post\">\n\
         <dl><dt><label for=\"todo\">Enter a new todo item:</label></dt>\n\
         <dd><input name=\"todo\" id=\"todo\" placeholder=\"Something to do\" type=\"text\" value=\"{value}\"></dd></dl>\n\
         <fieldset class=\"actions\"><input type=\"submit\" value=\"Add\"></fieldset>\n</form>\n",
        id = list.id,
        value = escape_html(todo_name),
    );

    layout(&list.name, flash, header, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn list_names_are_escaped_in_overview() {
        let mut lists = ListCollection::new();
        lists.create_list("<script>").unwrap();
        let page = lists_page(&lists, &Flash::default());
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<h2><script>"));
    }

    #[test]
    fn renders_flash_messages() {
        let flash = Flash {
            error: Some("Bad".to_string()),
            success: Some("Good".to_string()),
        };
        let page = new_list_page("", &flash);
        assert!(page.contains("flash error"));
        assert!(page.contains("Bad"));
        assert!(page.contains("Good"));
    }

    #[test]
    fn completed_todos_render_after_pending_ones() {
        let mut list = TodoList::new(1, "Chores");
        let first = list.add_todo("Sweep").unwrap().id;
        list.add_todo("Mop").unwrap();
        list.toggle_todo(first, true).unwrap();

        let page = list_page(&list, "", &Flash::default());
        let mop = page.find("Mop").unwrap();
        let sweep = page.find("Sweep").unwrap();
        assert!(mop < sweep);
        assert!(page.contains("1 remaining"));
    }
}
