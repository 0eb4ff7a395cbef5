use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct CollectionMetadataDoc { pub id: Uuid, pub collection_name: String }

#[derive(ToSchema)]
pub struct CompanyDoc { pub id: i32, pub company_name: String, pub liked: bool }

#[derive(ToSchema)]
pub struct CompanyCollectionOutputDoc {
    pub id: Uuid,
    pub collection_name: String,
    pub companies: Vec<CompanyDoc>,
    pub total: u64,
}

#[derive(ToSchema)]
pub struct CompanyBatchOutputDoc {
    pub companies: Vec<CompanyDoc>,
    pub total: u64,
}

#[derive(ToSchema)]
pub struct MoveCompaniesRequestDoc {
    pub destination_id: Uuid,
    pub company_ids: Vec<i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::collections::list,
        crate::routes::collections::get,
        crate::routes::collections::move_companies,
        crate::routes::collections::move_all,
        crate::routes::companies::list,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            CollectionMetadataDoc,
            CompanyDoc,
            CompanyCollectionOutputDoc,
            CompanyBatchOutputDoc,
            MoveCompaniesRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "collections"),
        (name = "companies")
    )
)]
pub struct ApiDoc;
