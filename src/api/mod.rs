mod handlers;
pub mod middleware;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::session::SessionStore;

pub fn create_router(store: SessionStore) -> Router {
    // Health checks and static assets never touch the session store
    let public = Router::new()
        .route("/javascripts/application.js", get(handlers::client_script))
        .route("/health", get(handlers::health));

    let app = Router::new()
        .route("/", get(handlers::root))
        // Lists
        .route("/lists", get(handlers::list_lists))
        .route("/lists", post(handlers::create_list))
        .route("/lists/new", get(handlers::new_list))
        .route("/lists/{id}", get(handlers::show_list))
        .route("/lists/{id}", post(handlers::update_list))
        .route("/lists/{id}/edit", get(handlers::edit_list))
        .route("/lists/{id}/destroy", post(handlers::destroy_list))
        .route("/lists/{id}/delete", post(handlers::destroy_list))
        .route("/lists/{id}/complete_all", post(handlers::complete_all))
        // Todos
        .route("/lists/{id}/todos", post(handlers::create_todo))
        .route("/lists/{id}/todos/{todo_id}", post(handlers::toggle_todo))
        .route(
            "/lists/{id}/todos/{todo_id}/destroy",
            post(handlers::destroy_todo),
        )
        .route(
            "/lists/{id}/todos/{todo_id}/delete",
            post(handlers::destroy_todo),
        )
        .layer(from_fn_with_state(store, middleware::session_middleware));

    app.merge(public).layer(TraceLayer::new_for_http())
}
