use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::instrument;

use models::{company, company_collection_association as association};

use super::{CompanyBatchOutput, CompanyOutput};
use crate::errors::ServiceError;
use crate::liked::LikedCollection;
use crate::pagination::Page;

#[async_trait]
pub trait CompanyCatalog: Send + Sync {
    /// Companies for `company_ids`, in the order given, each flagged `liked` when it belongs
    /// to the liked collection. Unknown ids are skipped.
    async fn fetch_companies_with_liked(&self, company_ids: &[i32]) -> Result<Vec<CompanyOutput>, ServiceError>;

    /// One page of the whole catalog ordered by id.
    async fn list_companies(&self, page: Page) -> Result<CompanyBatchOutput, ServiceError>;
}

/// SeaORM-backed catalog.
pub struct SeaOrmCompanyCatalog {
    pub db: DatabaseConnection,
    pub liked: Arc<LikedCollection>,
}

impl SeaOrmCompanyCatalog {
    pub fn new(db: DatabaseConnection, liked: Arc<LikedCollection>) -> Self { Self { db, liked } }

    async fn liked_among(&self, company_ids: &[i32]) -> Result<HashSet<i32>, ServiceError> {
        let Some(liked_id) = self.liked.id(&self.db).await? else { return Ok(HashSet::new()); };
        let ids = association::Entity::find()
            .select_only()
            .column(association::Column::CompanyId)
            .filter(association::Column::CollectionId.eq(liked_id))
            .filter(association::Column::CompanyId.is_in(company_ids.iter().copied()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        Ok(ids.into_iter().collect())
    }
}

#[async_trait]
impl CompanyCatalog for SeaOrmCompanyCatalog {
    #[instrument(skip_all, fields(count = company_ids.len()))]
    async fn fetch_companies_with_liked(&self, company_ids: &[i32]) -> Result<Vec<CompanyOutput>, ServiceError> {
        if company_ids.is_empty() { return Ok(Vec::new()); }
        let rows = company::Entity::find()
            .filter(company::Column::Id.is_in(company_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        let liked = self.liked_among(company_ids).await?;
        let mut by_id: HashMap<i32, company::Model> = rows.into_iter().map(|c| (c.id, c)).collect();
        Ok(company_ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .map(|c| CompanyOutput { liked: liked.contains(&c.id), id: c.id, company_name: c.company_name })
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_companies(&self, page: Page) -> Result<CompanyBatchOutput, ServiceError> {
        page.validate()?;
        let total = company::Entity::find().count(&self.db).await.map_err(ServiceError::db)?;
        let ids = company::Entity::find()
            .select_only()
            .column(company::Column::Id)
            .order_by_asc(company::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        let companies = self.fetch_companies_with_liked(&ids).await?;
        Ok(CompanyBatchOutput { companies, total })
    }
}
