use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::get};

use crate::config::Config;
use crate::handlers::{api_v1, pages};
use crate::middleware::cache::{ResponseCache, cached_page};
use crate::middleware::errors::translate_errors;
use crate::provider::DataProvider;

/// Shared application state: immutable config, the data-provider seam and
/// the page-response cache.
#[derive(Clone)]
pub struct UpdaterState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn DataProvider>,
    pub cache: Option<ResponseCache>,
}

impl UpdaterState {
    pub fn new(config: Arc<Config>, provider: Arc<dyn DataProvider>) -> Self {
        let cache = ResponseCache::from_config(&config);
        Self {
            config,
            provider,
            cache,
        }
    }
}

/// Build the axum router. The three page routes sit behind the response
/// cache; the error translator wraps everything so API and HTML paths share
/// one failure contract.
pub fn updater_router(state: UpdaterState) -> Router {
    let pages = Router::new()
        .route("/", get(pages::show_index))
        .route("/{device}", get(pages::web_device))
        .route("/{device}/changes", get(pages::show_changelog))
        .route_layer(from_fn_with_state(state.clone(), cached_page));

    let api = Router::new()
        .route("/api/v1/devices/{device}", get(api_v1::device))
        .route("/api/v1/builds/{device}", get(api_v1::builds));

    Router::new()
        .route("/favicon.ico", get(pages::favicon))
        .merge(pages)
        .merge(api)
        .layer(from_fn_with_state(state.clone(), translate_errors))
        .with_state(state)
}
