use crate::models::{
    CatalogStats, CreateUploadRequest, SearchParams, UpdateUploadRequest, Upload,
    UploadListResponse,
};
use crate::storage::UploadCatalog;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<UploadCatalog>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/uploads", post(create_upload).get(search_uploads))
        .route("/uploads/:id", put(update_upload).delete(delete_upload))
        .route("/uploaders/:uploader_id/uploads", get(uploader_uploads))
        .route("/stats", get(catalog_stats))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn create_upload(
    State(state): State<AppState>,
    Json(payload): Json<CreateUploadRequest>,
) -> Result<(StatusCode, Json<Upload>), (StatusCode, String)> {
    if payload.title.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Title cannot be empty".to_string(),
        ));
    }

    let upload = state
        .catalog
        .add(payload)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to save upload: {}", e),
            )
        })?;

    tracing::info!(id = %upload.id, title = %upload.title, "upload created");
    Ok((StatusCode::CREATED, Json(upload)))
}

async fn search_uploads(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<UploadListResponse>, (StatusCode, String)> {
    let mut uploads = state
        .catalog
        .search(
            &params.query,
            params.category,
            params.department,
            params.custom_department.as_deref(),
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to search uploads: {}", e),
            )
        })?;

    uploads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(UploadListResponse { uploads }))
}

async fn update_upload(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateUploadRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .catalog
        .update(&id, patch)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update upload: {}", e),
            )
        })?;

    tracing::info!(id = %id, "upload updated");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_upload(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .catalog
        .delete(&id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to delete upload: {}", e),
            )
        })?;

    tracing::info!(id = %id, "upload deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn uploader_uploads(
    State(state): State<AppState>,
    Path(uploader_id): Path<String>,
) -> Result<Json<UploadListResponse>, (StatusCode, String)> {
    let mut uploads = state
        .catalog
        .get_by_uploader(&uploader_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to list uploads: {}", e),
            )
        })?;

    uploads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(UploadListResponse { uploads }))
}

async fn catalog_stats(
    State(state): State<AppState>,
) -> Result<Json<CatalogStats>, (StatusCode, String)> {
    let stats = state.catalog.stats().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to compute stats: {}", e),
        )
    })?;

    Ok(Json(stats))
}
