use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;

use crate::api::middleware::Programmatic;
use crate::error::TodoError;
use crate::models::{ListId, TodoId};
use crate::session::{Flash, Session, SessionData};
use crate::views;

const CLIENT_SCRIPT: &str = include_str!("../../../public/javascripts/application.js");

// ============================================================
// Form Bodies
// ============================================================

#[derive(Debug, Deserialize)]
pub struct ListNameForm {
    #[serde(default)]
    pub list_name: String,
}

#[derive(Debug, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub todo: String,
}

/// Body of a toggle request. Only the literal `"true"` marks a todo completed.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    #[serde(default)]
    pub completed: String,
}

// ============================================================
// Error Handling
// ============================================================

/// Path ids that do not parse are treated like ids that do not exist.
fn parse_list_id(raw: &str) -> Result<ListId, TodoError> {
    raw.parse().map_err(|_| TodoError::ListNotFound)
}

fn parse_todo_id(raw: &str) -> Result<TodoId, TodoError> {
    raw.parse().map_err(|_| TodoError::TodoNotFound)
}

fn list_path(id: ListId) -> String {
    format!("/lists/{}", id)
}

/// Send the visitor to the nearest safe page with an error message.
///
/// Missing lists go back to the overview, missing todos back to their list.
fn redirect_with_error(
    session: &Session,
    mut data: SessionData,
    error: TodoError,
    list_id: Option<ListId>,
) -> Response {
    tracing::warn!("Lookup failed: {}", error);
    let target = match (&error, list_id) {
        (TodoError::TodoNotFound, Some(id)) => list_path(id),
        _ => "/lists".to_string(),
    };
    data.set_error(error.to_string());
    session.save(data);
    Redirect::to(&target).into_response()
}

/// Store a success message and redirect.
fn redirect_with_success(
    session: &Session,
    mut data: SessionData,
    message: &str,
    target: &str,
) -> Response {
    data.set_success(message);
    session.save(data);
    Redirect::to(target).into_response()
}

/// Re-render a form after a validation failure. Pending messages are shown
/// alongside the validation error and then cleared.
fn rerender_with_error(
    session: &Session,
    mut data: SessionData,
    error: TodoError,
    render: impl FnOnce(&SessionData, &Flash) -> String,
) -> Response {
    tracing::warn!("Validation error: {}", error);
    let mut flash = data.take_flash();
    flash.error = Some(error.to_string());
    let page = render(&data, &flash);
    session.save(data);
    (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response()
}

/// Render a page, consuming any pending status messages.
fn render_page(
    session: &Session,
    mut data: SessionData,
    render: impl FnOnce(&SessionData, &Flash) -> String,
) -> Response {
    let flash = data.take_flash();
    let page = render(&data, &flash);
    session.save(data);
    Html(page).into_response()
}

// ============================================================
// Health & Assets
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn client_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        CLIENT_SCRIPT,
    )
}

pub async fn root() -> Redirect {
    Redirect::to("/lists")
}

// ============================================================
// Lists
// ============================================================

pub async fn list_lists(session: Session) -> Response {
    let data = session.load();
    render_page(&session, data, |data, flash| {
        views::lists_page(&data.lists, flash)
    })
}

pub async fn new_list(session: Session) -> Response {
    let data = session.load();
    render_page(&session, data, |_, flash| views::new_list_page("", flash))
}

pub async fn create_list(session: Session, Form(form): Form<ListNameForm>) -> Response {
    let mut data = session.load();

    match data.lists.create_list(&form.list_name).map(|list| list.id) {
        Ok(id) => {
            tracing::info!("Created list {}", id);
            redirect_with_success(&session, data, "The list has been created.", "/lists")
        }
        Err(e) => rerender_with_error(&session, data, e, |_, flash| {
            views::new_list_page(form.list_name.trim(), flash)
        }),
    }
}

pub async fn show_list(session: Session, Path(raw_id): Path<String>) -> Response {
    let data = session.load();

    let list = parse_list_id(&raw_id)
        .and_then(|id| data.lists.get(id).cloned().ok_or(TodoError::ListNotFound));
    match list {
        Ok(list) => render_page(&session, data, |_, flash| views::list_page(&list, "", flash)),
        Err(e) => redirect_with_error(&session, data, e, None),
    }
}

pub async fn edit_list(session: Session, Path(raw_id): Path<String>) -> Response {
    let data = session.load();

    let list = parse_list_id(&raw_id)
        .and_then(|id| data.lists.get(id).cloned().ok_or(TodoError::ListNotFound));
    match list {
        Ok(list) => render_page(&session, data, |_, flash| {
            views::edit_list_page(&list, &list.name, flash)
        }),
        Err(e) => redirect_with_error(&session, data, e, None),
    }
}

pub async fn update_list(
    session: Session,
    Path(raw_id): Path<String>,
    Form(form): Form<ListNameForm>,
) -> Response {
    let mut data = session.load();

    let id = match parse_list_id(&raw_id) {
        Ok(id) => id,
        Err(e) => return redirect_with_error(&session, data, e, None),
    };

    match data.lists.rename_list(id, &form.list_name).map(|list| list.id) {
        Ok(id) => {
            tracing::info!("Renamed list {}", id);
            redirect_with_success(&session, data, "The list has been updated.", &list_path(id))
        }
        Err(e) if e.is_validation() => match data.lists.get(id).cloned() {
            Some(list) => rerender_with_error(&session, data, e, |_, flash| {
                views::edit_list_page(&list, form.list_name.trim(), flash)
            }),
            None => redirect_with_error(&session, data, TodoError::ListNotFound, None),
        },
        Err(e) => redirect_with_error(&session, data, e, None),
    }
}

pub async fn destroy_list(
    session: Session,
    Programmatic(programmatic): Programmatic,
    Path(raw_id): Path<String>,
) -> Response {
    let mut data = session.load();

    let deleted = parse_list_id(&raw_id).and_then(|id| data.lists.delete_list(id));
    match deleted {
        Ok(list) => {
            tracing::info!("Deleted list {}", list.id);
            if programmatic {
                session.save(data);
                (StatusCode::OK, "/lists").into_response()
            } else {
                redirect_with_success(&session, data, "The list has been deleted.", "/lists")
            }
        }
        Err(e) if programmatic => {
            tracing::warn!("Programmatic delete failed: {}", e);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e) => redirect_with_error(&session, data, e, None),
    }
}

// ============================================================
// Todos
// ============================================================

pub async fn create_todo(
    session: Session,
    Path(raw_id): Path<String>,
    Form(form): Form<TodoForm>,
) -> Response {
    let mut data = session.load();

    let id = match parse_list_id(&raw_id) {
        Ok(id) => id,
        Err(e) => return redirect_with_error(&session, data, e, None),
    };

    let added = data
        .lists
        .find_mut(id)
        .and_then(|list| list.add_todo(&form.todo).map(|todo| todo.id));
    match added {
        Ok(todo_id) => {
            tracing::info!("Added todo {} to list {}", todo_id, id);
            redirect_with_success(&session, data, "The todo was added.", &list_path(id))
        }
        Err(e) if e.is_validation() => match data.lists.get(id).cloned() {
            Some(list) => rerender_with_error(&session, data, e, |_, flash| {
                views::list_page(&list, form.todo.trim(), flash)
            }),
            None => redirect_with_error(&session, data, TodoError::ListNotFound, None),
        },
        Err(e) => redirect_with_error(&session, data, e, None),
    }
}

pub async fn toggle_todo(
    session: Session,
    Path((raw_list_id, raw_todo_id)): Path<(String, String)>,
    Form(form): Form<ToggleForm>,
) -> Response {
    let mut data = session.load();
    let completed = form.completed == "true";

    let id = match parse_list_id(&raw_list_id) {
        Ok(id) => id,
        Err(e) => return redirect_with_error(&session, data, e, None),
    };

    let toggled = parse_todo_id(&raw_todo_id).and_then(|todo_id| {
        data.lists
            .find_mut(id)
            .and_then(|list| list.toggle_todo(todo_id, completed).map(|_| todo_id))
    });
    match toggled {
        Ok(todo_id) => {
            tracing::info!("Set todo {} in list {} completed={}", todo_id, id, completed);
            redirect_with_success(&session, data, "The todo has been updated.", &list_path(id))
        }
        Err(e) => redirect_with_error(&session, data, e, Some(id)),
    }
}

pub async fn destroy_todo(
    session: Session,
    Programmatic(programmatic): Programmatic,
    Path((raw_list_id, raw_todo_id)): Path<(String, String)>,
) -> Response {
    let mut data = session.load();

    let id = match parse_list_id(&raw_list_id) {
        Ok(id) => id,
        Err(e) if programmatic => return (StatusCode::NOT_FOUND, e.to_string()).into_response(),
        Err(e) => return redirect_with_error(&session, data, e, None),
    };

    let deleted = parse_todo_id(&raw_todo_id).and_then(|todo_id| {
        data.lists
            .find_mut(id)
            .and_then(|list| list.delete_todo(todo_id))
    });
    match deleted {
        Ok(todo) => {
            tracing::info!("Deleted todo {} from list {}", todo.id, id);
            if programmatic {
                session.save(data);
                StatusCode::NO_CONTENT.into_response()
            } else {
                redirect_with_success(&session, data, "The todo has been deleted.", &list_path(id))
            }
        }
        Err(e) if programmatic => {
            tracing::warn!("Programmatic delete failed: {}", e);
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e) => redirect_with_error(&session, data, e, Some(id)),
    }
}

pub async fn complete_all(session: Session, Path(raw_id): Path<String>) -> Response {
    let mut data = session.load();

    let completed = parse_list_id(&raw_id).and_then(|id| {
        let list = data.lists.find_mut(id)?;
        list.complete_all();
        Ok(id)
    });
    match completed {
        Ok(id) => {
            tracing::info!("Completed all todos in list {}", id);
            redirect_with_success(&session, data, "All todos have been completed.", &list_path(id))
        }
        Err(e) => redirect_with_error(&session, data, e, None),
    }
}
