// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTTP collaborator API over a diagram folder.
//!
//! Four endpoints, all JSON:
//!
//! - `GET /api/list` — record summaries, most recently updated first
//! - `GET /api/load/{id}` — one full record; 404 when the id is unknown
//! - `POST /api/save` — insert or update; responds with the record id
//! - `DELETE /api/delete/{id}` — remove; deleting an unknown id succeeds

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::model::{Diagram, DiagramId};
use crate::store::{DiagramFolder, DiagramSummary, SavePayload, StoreError};

pub fn router(folder: Arc<DiagramFolder>) -> Router {
    Router::new()
        .route("/api/list", get(list_diagrams))
        .route("/api/load/{id}", get(load_diagram))
        .route("/api/save", post(save_diagram))
        .route("/api/delete/{id}", delete(delete_diagram))
        .with_state(folder)
}

#[derive(Debug, Serialize)]
struct LoadResponse {
    id: DiagramId,
    name: String,
    #[serde(rename = "updatedAt")]
    updated_at_millis: u64,
    data: Diagram,
}

#[derive(Debug, Serialize)]
struct SaveResponse {
    id: DiagramId,
}

async fn list_diagrams(
    State(folder): State<Arc<DiagramFolder>>,
) -> Result<Json<Vec<DiagramSummary>>, ApiError> {
    Ok(Json(folder.list_diagrams()?))
}

async fn load_diagram(
    State(folder): State<Arc<DiagramFolder>>,
    Path(id): Path<String>,
) -> Result<Json<LoadResponse>, ApiError> {
    let id = parse_id(&id)?;
    let record = folder
        .load_diagram(&id)?
        .ok_or_else(|| ApiError::NotFound(id))?;
    Ok(Json(LoadResponse {
        id: record.id,
        name: record.name,
        updated_at_millis: record.updated_at_millis,
        data: record.diagram,
    }))
}

async fn save_diagram(
    State(folder): State<Arc<DiagramFolder>>,
    Json(payload): Json<SavePayload>,
) -> Result<Json<SaveResponse>, ApiError> {
    let id = folder.save_diagram(&payload)?;
    Ok(Json(SaveResponse { id }))
}

async fn delete_diagram(
    State(folder): State<Arc<DiagramFolder>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    folder.delete_diagram(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<DiagramId, ApiError> {
    DiagramId::new(raw).map_err(|_| ApiError::BadId)
}

#[derive(Debug)]
enum ApiError {
    Store(StoreError),
    NotFound(DiagramId),
    BadId,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Store(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Self::NotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("no diagram with id {}", id.as_str()),
            ),
            Self::BadId => (StatusCode::BAD_REQUEST, "invalid diagram id".to_owned()),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
