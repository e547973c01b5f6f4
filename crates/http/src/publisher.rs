use crate::content_type::content_type;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use pkglink_core::{AssetUrl, Assets};
use std::path::Path;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tracing::debug;

/// Every asset URL names one version of one file, so it never changes.
pub const CACHE_CONTROL_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Serve `GET`/`HEAD` requests for asset URLs; pass everything else on.
///
/// A URL with this signature that does not resolve to a file is a 404.
pub async fn publish(State(assets): State<Arc<Assets>>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    if method != Method::GET && method != Method::HEAD {
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();
    if !AssetUrl::has_signature(&path, assets.signature()) {
        return next.run(request).await;
    }

    let Some(file) = urlencoding::decode(&path)
        .ok()
        .and_then(|decoded| AssetUrl::parse(&decoded))
        .and_then(|url| assets.resolve(&url))
    else {
        debug!(path = %path, "asset not found");
        return not_found();
    };

    debug!(path = %path, "serving asset");
    serve_file(&path, &file, method == Method::HEAD).await
}

async fn serve_file(url_path: &str, file_path: &Path, head_only: bool) -> Response {
    let Ok(file) = tokio::fs::File::open(file_path).await else {
        return not_found();
    };
    let length = match file.metadata().await {
        Ok(metadata) if metadata.is_file() => metadata.len(),
        _ => return not_found(),
    };

    let body = if head_only {
        Body::empty()
    } else {
        Body::from_stream(ReaderStream::new(file))
    };

    let mut response = Response::new(body);
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type(url_path)),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_IMMUTABLE),
    );
    response
}

fn not_found() -> Response {
    StatusCode::NOT_FOUND.into_response()
}
