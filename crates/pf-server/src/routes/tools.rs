//! External tool availability.

use axum::extract::State;
use axum::Json;

use pf_av::ToolInfo;

use crate::context::AppContext;
use crate::error::AppError;

/// GET /tools
#[utoipa::path(
    get,
    path = "/tools",
    responses(
        (status = 200, description = "Availability of ffmpeg and ffprobe", body = Vec<ToolInfo>)
    )
)]
pub async fn tools(State(ctx): State<AppContext>) -> Result<Json<Vec<ToolInfo>>, AppError> {
    // `check_all` runs `<tool> -version` synchronously.
    let registry = ctx.tools.clone();
    let infos = tokio::task::spawn_blocking(move || registry.check_all())
        .await
        .map_err(|e| pf_core::Error::Io {
            source: std::io::Error::other(e),
        })?;
    Ok(Json(infos))
}
