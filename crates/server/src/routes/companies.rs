use axum::{extract::State, Json};
use service::companies::{CompanyBatchOutput, CompanyCatalog};
use service::pagination::Page;

use crate::errors::JsonApiError;
use crate::extractors::ApiQuery;
use crate::{routes::collections::PageQuery, state::ServerState};

#[utoipa::path(
    get, path = "/companies", tag = "companies",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of the catalog", body = crate::openapi::CompanyBatchOutputDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> Result<Json<CompanyBatchOutput>, JsonApiError> {
    let page = Page::from_query(q.offset, q.limit, state.default_page_size);
    let out = state.catalog.list_companies(page).await?;
    Ok(Json(out))
}
