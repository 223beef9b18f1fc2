use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{error::Result, server::AppState, types::ViewTotal, utils::validate_slug};

/// `GET /api/views/{slug}`
pub async fn get_views(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ViewTotal>> {
    let total = state.views.total(validate_slug(&slug)?).await?;
    Ok(Json(ViewTotal { total }))
}

/// `POST /api/views/{slug}`
pub async fn register_view(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ViewTotal>> {
    let total = state.views.register(validate_slug(&slug)?).await?;
    Ok(Json(ViewTotal { total }))
}
