use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use pkglink_core::{Assets, Inclusions};
use std::sync::Arc;
use tracing::{debug, warn};

const ANCHOR: &[u8] = b"</head>";

/// Run the inner handler with a fresh [`Inclusions`] in the request
/// extensions, then insert the tags for its closure before `</head>`.
///
/// Only uncompressed HTML responses are buffered; everything else streams
/// through untouched.
pub async fn inject(State(assets): State<Arc<Assets>>, mut request: Request, next: Next) -> Response {
    let inclusions = Inclusions::new();
    request.extensions_mut().insert(inclusions.clone());

    let response = next.run(request).await;
    if inclusions.is_empty() || !is_plain_html(response.headers()) {
        return response;
    }

    let closure = inclusions.closure();
    let tags = assets.renderer().render_all(&closure);
    if tags.is_empty() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let html = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(html) => html,
        Err(err) => {
            warn!("Failed to buffer HTML response: {}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let Some(rewritten) = insert_before_head_close(&html, &tags) else {
        return Response::from_parts(parts, Body::from(html));
    };

    debug!(resources = closure.len(), "injected tags");
    parts
        .headers
        .insert(header::CONTENT_LENGTH, HeaderValue::from(rewritten.len()));
    Response::from_parts(parts, Body::from(rewritten))
}

fn is_plain_html(headers: &HeaderMap) -> bool {
    let encoded = headers
        .get(header::CONTENT_ENCODING)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| !value.trim().eq_ignore_ascii_case("identity"));
    if encoded {
        return false;
    }

    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .is_some_and(|mime| {
            mime.eq_ignore_ascii_case("text/html")
                || mime.eq_ignore_ascii_case("application/xhtml+xml")
        })
}

/// `html` with `tags` inserted right before the first `</head>` (matched
/// case-insensitively), or `None` if there is no such anchor.
pub fn insert_before_head_close(html: &[u8], tags: &str) -> Option<Vec<u8>> {
    let position = html
        .windows(ANCHOR.len())
        .position(|window| window.eq_ignore_ascii_case(ANCHOR))?;

    let mut rewritten = Vec::with_capacity(html.len() + tags.len());
    rewritten.extend_from_slice(&html[..position]);
    rewritten.extend_from_slice(tags.as_bytes());
    rewritten.extend_from_slice(&html[position..]);
    Some(rewritten)
}
