use axum::{
    extract::{Path, State},
    response::Response,
};
use serde_json::Value;

use crate::error::AppError;
use crate::router::UpdaterState;
use crate::templates::{base_context, render_response};
use crate::types::RomView;

/// Index: the changelog view with no active device.
pub async fn show_index(State(state): State<UpdaterState>) -> Result<Response, AppError> {
    let oems = state.provider.list_oems().await?;

    let mut ctx = base_context(&state.config);
    ctx.insert("oems", &oems);
    ctx.insert("active_device_data", &Value::Null);
    ctx.insert("before", &0);
    ctx.insert("changelog", &true);
    Ok(render_response("changes.html", &ctx))
}

/// Device page: builds annotated with the primary artifact and, when the
/// device expects one, the recovery image.
pub async fn web_device(
    State(state): State<UpdaterState>,
    Path(device): Path<String>,
) -> Result<Response, AppError> {
    let oems = state.provider.list_oems().await?;
    let device_data = state.provider.get_device(&device).await?;
    let builds = state.provider.list_builds(&device).await?;

    let roms: Vec<RomView> = builds
        .into_iter()
        .map(|build| RomView::from_build(build, device_data.wants_recovery()))
        .collect();
    let has_recovery = roms.iter().any(|rom| rom.recovery.is_some());

    let mut ctx = base_context(&state.config);
    ctx.insert("oems", &oems);
    ctx.insert("active_device_data", &device_data);
    ctx.insert("roms", &roms);
    ctx.insert("has_recovery", &has_recovery);
    ctx.insert(
        "wiki_info",
        &state.config.wiki_info_url.replace("{device}", &device_data.model),
    );
    ctx.insert(
        "wiki_install",
        &state
            .config
            .wiki_install_url
            .replace("{device}", &device_data.model),
    );
    ctx.insert("download_base_url", &state.config.download_base_url);
    Ok(render_response("device.html", &ctx))
}

/// Changelog scoped to one device.
pub async fn show_changelog(
    State(state): State<UpdaterState>,
    Path(device): Path<String>,
) -> Result<Response, AppError> {
    let oems = state.provider.list_oems().await?;
    let device_data = state.provider.get_device(&device).await?;

    let mut ctx = base_context(&state.config);
    ctx.insert("oems", &oems);
    ctx.insert("active_device_data", &device_data);
    ctx.insert("before", &0);
    ctx.insert("changelog", &true);
    Ok(render_response("changes.html", &ctx))
}

pub async fn favicon() -> &'static str {
    ""
}
