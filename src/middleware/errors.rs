use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use crate::error::AppError;
use crate::router::UpdaterState;
use crate::templates;
use crate::types::OemIndex;

const NOT_FOUND_HEADER: &str = "Whoops - this page doesn't exist";
const UPSTREAM_HEADER: &str = "Something went wrong";

/// The error-translator boundary: each failure raised by a handler is
/// classified once by kind, once by path prefix, and turned into the final
/// response. API callers get JSON, everyone else gets a rendered page.
pub async fn translate_errors(
    State(state): State<UpdaterState>,
    req: Request,
    next: Next,
) -> Response {
    let is_api = req.uri().path().starts_with("/api/");
    let path = req.uri().path().to_owned();

    let mut response = next.run(req).await;
    let Some(err) = response.extensions_mut().remove::<AppError>() else {
        return response;
    };

    match &err {
        AppError::DeviceNotFound { message } => {
            warn!(path = %path, "device not found");
            if is_api {
                return (err.status_code(), Json(json!({ "response": [] }))).into_response();
            }
            // A nested failure here cannot re-enter the translator; the
            // error page degrades to an empty navigation instead.
            let oems = state.provider.list_oems().await.unwrap_or_default();
            error_page(&state, NOT_FOUND_HEADER, message, &oems, err.status_code())
        }
        AppError::UpstreamApi { message, .. } => {
            error!(path = %path, error = %err, "upstream API failure");
            if is_api {
                return (err.status_code(), Json(err.to_json())).into_response();
            }
            error_page(
                &state,
                UPSTREAM_HEADER,
                message,
                &OemIndex::new(),
                err.status_code(),
            )
        }
    }
}

fn error_page(
    state: &UpdaterState,
    header: &str,
    message: &str,
    oems: &OemIndex,
    status: StatusCode,
) -> Response {
    let mut ctx = templates::base_context(&state.config);
    ctx.insert("oems", oems);
    ctx.insert("header", header);
    ctx.insert("message", message);

    let mut response = templates::render_response("error.html", &ctx);
    if response.status() == StatusCode::OK {
        *response.status_mut() = status;
    }
    response
}
