use axum::{extract::State, Json};
use common::types::Message;
use serde::Deserialize;
use service::collections::{CollectionMetadata, CompanyCollectionOutput};
use service::pagination::Page;
use tracing::info;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::state::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// The number of items to skip from the beginning
    pub offset: Option<u64>,
    /// The number of items to fetch
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MoveAllQuery {
    pub destination_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct MoveCompaniesRequest {
    pub destination_id: Uuid,
    pub company_ids: Vec<i32>,
}

fn moved_message(n: u64) -> Message {
    Message::new(format!("Moved {} companies successfully.", n))
}

#[utoipa::path(
    get, path = "/collections", tag = "collections",
    responses(
        (status = 200, description = "All collections", body = [crate::openapi::CollectionMetadataDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CollectionMetadata>>, JsonApiError> {
    let all = state.collections.list_metadata().await?;
    info!(count = all.len(), "list collections");
    Ok(Json(all))
}

#[utoipa::path(
    get, path = "/collections/{collection_id}", tag = "collections",
    params(("collection_id" = Uuid, Path, description = "Collection ID"), PageQuery),
    responses(
        (status = 200, description = "One page of the collection", body = crate::openapi::CompanyCollectionOutputDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    ApiPath(collection_id): ApiPath<Uuid>,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> Result<Json<CompanyCollectionOutput>, JsonApiError> {
    let page = Page::from_query(q.offset, q.limit, state.default_page_size);
    let out = state.collections.get_collection(collection_id, page).await?;
    Ok(Json(out))
}

#[utoipa::path(
    post, path = "/collections/{source_id}/move", tag = "collections",
    params(("source_id" = Uuid, Path, description = "Source collection ID")),
    request_body = crate::openapi::MoveCompaniesRequestDoc,
    responses(
        (status = 200, description = "Moved", body = crate::openapi::MessageDoc),
        (status = 404, description = "Source or destination not found"),
        (status = 500, description = "Move Failed")
    )
)]
pub async fn move_companies(
    State(state): State<ServerState>,
    ApiPath(source_id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<MoveCompaniesRequest>,
) -> Result<Json<Message>, JsonApiError> {
    info!(%source_id, destination_id = %req.destination_id, requested = req.company_ids.len(), "move_companies_request");
    let moved = state
        .collections
        .move_companies(source_id, req.destination_id, &req.company_ids)
        .await
        .map_err(JsonApiError::move_failed)?;
    Ok(Json(moved_message(moved)))
}

#[utoipa::path(
    post, path = "/collections/{source_id}/move_all", tag = "collections",
    params(("source_id" = Uuid, Path, description = "Source collection ID"), MoveAllQuery),
    responses(
        (status = 200, description = "Moved", body = crate::openapi::MessageDoc),
        (status = 404, description = "Source or destination not found"),
        (status = 500, description = "Move Failed")
    )
)]
pub async fn move_all(
    State(state): State<ServerState>,
    ApiPath(source_id): ApiPath<Uuid>,
    ApiQuery(q): ApiQuery<MoveAllQuery>,
) -> Result<Json<Message>, JsonApiError> {
    info!(%source_id, destination_id = %q.destination_id, "move_all_request");
    let moved = state
        .collections
        .move_all_companies(source_id, q.destination_id)
        .await
        .map_err(JsonApiError::move_failed)?;
    Ok(Json(moved_message(moved)))
}
