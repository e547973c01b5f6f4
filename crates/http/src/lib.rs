//! HTTP layers: the asset publisher and the tag injector.
//!
//! Both are plain axum middleware without a listener of their own; [`wrap`]
//! puts the publisher in front of the injector in front of an application.

mod content_type;
pub mod injector;
pub mod publisher;

pub use content_type::content_type;
pub use injector::{inject, insert_before_head_close};
pub use publisher::{CACHE_CONTROL_IMMUTABLE, publish};

use axum::Router;
use axum::middleware::from_fn_with_state;
use pkglink_core::Assets;
use std::sync::Arc;
use tower::Layer;

/// Serve asset URLs from `assets`, forwarding everything else to `app`.
pub fn publisher(app: Router, assets: Arc<Assets>) -> Router {
    Router::new().fallback_service(from_fn_with_state(assets, publish).layer(app))
}

/// Give `app` a per-request [`pkglink_core::Inclusions`] extension and
/// inject the resulting tags into its HTML responses.
pub fn injector(app: Router, assets: Arc<Assets>) -> Router {
    Router::new().fallback_service(from_fn_with_state(assets, inject).layer(app))
}

/// Publisher around injector around `app`.
pub fn wrap(app: Router, assets: Arc<Assets>) -> Router {
    publisher(injector(app, assets.clone()), assets)
}
