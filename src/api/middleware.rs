//! Session middleware and request extractors.

use std::convert::Infallible;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::session::{Session, SessionStore};

/// Header set by the client script on programmatic (AJAX) requests.
const REQUESTED_WITH: &str = "x-requested-with";
const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// Attach a [`Session`] to every request, issuing a cookie for new sessions.
pub async fn session_middleware(
    State(store): State<SessionStore>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let presented = session_id_from_cookies(request.headers(), &store.config().cookie_name);
    let (id, fresh) = store.resolve(presented);

    request
        .extensions_mut()
        .insert(Session::new(id, store.clone()));

    let mut response = next.run(request).await;

    if fresh {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            store.config().cookie_name,
            id
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!("Could not build session cookie: {}", e),
        }
    }

    response
}

/// Extract the session id from the `Cookie` headers, if present and well formed.
fn session_id_from_cookies(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Session>().cloned().ok_or_else(|| {
            tracing::error!("Session middleware is not installed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        })
    }
}

/// Whether the request came from script rather than a regular form submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Programmatic(pub bool);

impl<S> FromRequestParts<S> for Programmatic
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(is_programmatic(&parts.headers)))
    }
}

fn is_programmatic(headers: &HeaderMap) -> bool {
    headers
        .get(REQUESTED_WITH)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case(XML_HTTP_REQUEST))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn finds_session_cookie_among_others() {
        let id = Uuid::new_v4();
        let headers = cookie_headers(&format!("theme=dark; todo_session={}; other=1", id));
        assert_eq!(session_id_from_cookies(&headers, "todo_session"), Some(id));
    }

    #[test]
    fn ignores_malformed_session_cookie() {
        let headers = cookie_headers("todo_session=not-a-uuid");
        assert_eq!(session_id_from_cookies(&headers, "todo_session"), None);
    }

    #[test]
    fn missing_cookie_header_yields_none() {
        assert_eq!(session_id_from_cookies(&HeaderMap::new(), "todo_session"), None);
    }

    #[test]
    fn detects_xml_http_request_header() {
        let mut headers = HeaderMap::new();
        assert!(!is_programmatic(&headers));
        headers.insert(REQUESTED_WITH, HeaderValue::from_static("XMLHttpRequest"));
        assert!(is_programmatic(&headers));
    }
}
