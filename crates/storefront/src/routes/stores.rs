//! Store page handler.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::error::Result;
use crate::models::StoreView;
use crate::state::AppState;

/// Resolve a store and return its grouped catalog.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<StoreView>> {
    let resolved = state.catalog().resolve(&slug).await?;
    let store_url = state.config().store_url(resolved.vendor.store_slug.as_str());
    Ok(Json(StoreView::new(resolved, store_url)))
}
