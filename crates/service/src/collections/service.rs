use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use configs::CollectionsConfig;
use models::{company, company_collection, company_collection_association as association};

use super::{CollectionMetadata, CompanyCollectionOutput};
use crate::companies::CompanyCatalog;
use crate::errors::ServiceError;
use crate::liked::LikedCollection;
use crate::pagination::Page;

/// Application service for collection reads and moves.
/// Moves run in one transaction each and either apply completely or not at all.
pub struct CollectionService<C: CompanyCatalog> {
    db: DatabaseConnection,
    liked: Arc<LikedCollection>,
    catalog: Arc<C>,
    move_batch_size: usize,
}

impl<C: CompanyCatalog> CollectionService<C> {
    pub fn new(db: DatabaseConnection, liked: Arc<LikedCollection>, catalog: Arc<C>, cfg: &CollectionsConfig) -> Self {
        Self { db, liked, catalog, move_batch_size: cfg.move_batch_size.max(1) }
    }

    /// All collections in database order.
    pub async fn list_metadata(&self) -> Result<Vec<CollectionMetadata>, ServiceError> {
        let rows = company_collection::Entity::find().all(&self.db).await.map_err(ServiceError::db)?;
        Ok(rows
            .into_iter()
            .map(|c| CollectionMetadata { id: c.id, collection_name: c.collection_name })
            .collect())
    }

    /// One page of the companies in `collection_id`.
    ///
    /// Companies in the liked collection are hidden from every other collection;
    /// the liked collection itself shows all of its members.
    #[instrument(skip(self), fields(collection_id = %collection_id))]
    pub async fn get_collection(&self, collection_id: Uuid, page: Page) -> Result<CompanyCollectionOutput, ServiceError> {
        let collection = find_collection(&self.db, collection_id, "Collection").await?;
        page.validate()?;

        let mut query = association::Entity::find()
            .inner_join(company::Entity)
            .filter(association::Column::CollectionId.eq(collection_id));
        if !self.liked.is_liked(&collection) {
            if let Some(liked_id) = self.liked.id(&self.db).await? {
                let liked_members = Query::select()
                    .column(association::Column::CompanyId)
                    .from(association::Entity)
                    .and_where(association::Column::CollectionId.eq(liked_id))
                    .to_owned();
                query = query.filter(association::Column::CompanyId.not_in_subquery(liked_members));
            }
        }

        let total = query.clone().count(&self.db).await.map_err(ServiceError::db)?;
        let company_ids = query
            .select_only()
            .column(association::Column::CompanyId)
            .order_by_asc(association::Column::CompanyId)
            .offset(page.offset)
            .limit(page.limit)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        let companies = self.catalog.fetch_companies_with_liked(&company_ids).await?;
        debug!(total, returned = companies.len(), "collection page");

        Ok(CompanyCollectionOutput {
            id: collection.id,
            collection_name: collection.collection_name,
            companies,
            total,
        })
    }

    /// Re-point the associations of `company_ids` from `source_id` to `destination_id`.
    /// Ids not in the source are ignored. Returns the number of associations moved.
    #[instrument(skip(self, company_ids), fields(source_id = %source_id, destination_id = %destination_id, requested = company_ids.len()))]
    pub async fn move_companies(&self, source_id: Uuid, destination_id: Uuid, company_ids: &[i32]) -> Result<u64, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        let result = move_selected(&txn, source_id, destination_id, company_ids).await;
        let moved = finish(txn, result).await?;
        info!(moved, "moved companies");
        Ok(moved)
    }

    /// Move every company of `source_id` that is not already in `destination_id`.
    /// Companies present in both stay where they are. Returns the number of companies moved.
    #[instrument(skip(self), fields(source_id = %source_id, destination_id = %destination_id))]
    pub async fn move_all_companies(&self, source_id: Uuid, destination_id: Uuid) -> Result<u64, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::db)?;
        let result = move_all(&txn, source_id, destination_id, self.move_batch_size).await;
        let moved = finish(txn, result).await?;
        info!(moved, "moved all companies");
        Ok(moved)
    }
}

async fn find_collection<T: ConnectionTrait>(conn: &T, id: Uuid, label: &str) -> Result<company_collection::Model, ServiceError> {
    company_collection::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(ServiceError::db)?
        .ok_or_else(|| ServiceError::NotFound(format!("{label} {id} not found")))
}

async fn require_endpoints(txn: &DatabaseTransaction, source_id: Uuid, destination_id: Uuid) -> Result<(), ServiceError> {
    find_collection(txn, source_id, "Source collection").await?;
    find_collection(txn, destination_id, "Destination collection").await?;
    Ok(())
}

async fn move_selected(txn: &DatabaseTransaction, source_id: Uuid, destination_id: Uuid, company_ids: &[i32]) -> Result<u64, ServiceError> {
    require_endpoints(txn, source_id, destination_id).await?;
    if company_ids.is_empty() { return Ok(0); }
    let res = association::Entity::update_many()
        .col_expr(association::Column::CollectionId, Expr::value(destination_id))
        .filter(association::Column::CompanyId.is_in(company_ids.iter().copied()))
        .filter(association::Column::CollectionId.eq(source_id))
        .exec(txn)
        .await
        .map_err(ServiceError::db)?;
    Ok(res.rows_affected)
}

async fn move_all(txn: &DatabaseTransaction, source_id: Uuid, destination_id: Uuid, batch_size: usize) -> Result<u64, ServiceError> {
    require_endpoints(txn, source_id, destination_id).await?;
    let in_source = association::company_ids_in(txn, source_id).await?;
    let in_destination: HashSet<i32> = association::company_ids_in(txn, destination_id).await?.into_iter().collect();
    let to_move: Vec<i32> = in_source.into_iter().filter(|id| !in_destination.contains(id)).collect();

    for (n, batch) in to_move.chunks(batch_size).enumerate() {
        let res = association::Entity::update_many()
            .col_expr(association::Column::CollectionId, Expr::value(destination_id))
            .filter(association::Column::CompanyId.is_in(batch.iter().copied()))
            .filter(association::Column::CollectionId.eq(source_id))
            .exec(txn)
            .await
            .map_err(ServiceError::db)?;
        debug!(batch = n, size = batch.len(), rows = res.rows_affected, "moved batch");
    }
    Ok(to_move.len() as u64)
}

/// Commit on success; roll back and hand the error back otherwise.
async fn finish<T>(txn: DatabaseTransaction, result: Result<T, ServiceError>) -> Result<T, ServiceError> {
    match result {
        Ok(v) => {
            txn.commit().await.map_err(ServiceError::db)?;
            Ok(v)
        }
        Err(e) => {
            if let Err(rb) = txn.rollback().await {
                warn!(error = %rb, "rollback failed");
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companies::SeaOrmCompanyCatalog;
    use crate::test_support::{get_db, liked_list_id, seed_companies};

    fn service_with(db: &DatabaseConnection, cfg: CollectionsConfig) -> CollectionService<SeaOrmCompanyCatalog> {
        let liked = Arc::new(LikedCollection::new(cfg.liked_collection_name.clone()));
        let catalog = Arc::new(SeaOrmCompanyCatalog::new(db.clone(), Arc::clone(&liked)));
        CollectionService::new(db.clone(), liked, catalog, &cfg)
    }

    fn service(db: &DatabaseConnection) -> CollectionService<SeaOrmCompanyCatalog> {
        service_with(db, CollectionsConfig::default())
    }

    async fn sorted_ids(db: &DatabaseConnection, collection_id: Uuid) -> Result<Vec<i32>, anyhow::Error> {
        let mut ids = association::company_ids_in(db, collection_id).await?;
        ids.sort();
        Ok(ids)
    }

    #[tokio::test]
    async fn list_metadata_includes_seeded_and_created() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let extra = company_collection::create(&db, "Prospects").await?;

        let all = service(&db).list_metadata().await?;
        assert_eq!(all.len(), 3);
        assert!(all.iter().any(|c| c.id == extra.id && c.collection_name == "Prospects"));
        assert!(all.iter().any(|c| c.collection_name == "Liked Companies List"));
        Ok(())
    }

    #[tokio::test]
    async fn other_collections_hide_liked_companies() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ids = seed_companies(&db, "hide", 6).await?;
        let my_list = company_collection::create(&db, "Worklist").await?;
        let liked = liked_list_id(&db).await?;
        association::create_many(&db, &ids, my_list.id).await?;
        association::create_many(&db, &[ids[0], ids[3]], liked).await?;

        let out = service(&db).get_collection(my_list.id, Page { offset: 0, limit: 100 }).await?;
        let got: Vec<i32> = out.companies.iter().map(|c| c.id).collect();
        assert_eq!(got, vec![ids[1], ids[2], ids[4], ids[5]]);
        assert_eq!(out.total, 4);
        assert_eq!(out.collection_name, "Worklist");
        assert!(out.companies.iter().all(|c| !c.liked));
        Ok(())
    }

    #[tokio::test]
    async fn liked_collection_shows_all_members() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ids = seed_companies(&db, "liked", 3).await?;
        let liked = liked_list_id(&db).await?;
        association::create_many(&db, &ids, liked).await?;

        let out = service(&db).get_collection(liked, Page::default()).await?;
        assert_eq!(out.total, 3);
        assert_eq!(out.companies.iter().map(|c| c.id).collect::<Vec<_>>(), ids);
        assert!(out.companies.iter().all(|c| c.liked));
        Ok(())
    }

    #[tokio::test]
    async fn total_counts_whole_filtered_set() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ids = seed_companies(&db, "total", 25).await?;
        let list = company_collection::create(&db, "Big").await?;
        association::create_many(&db, &ids, list.id).await?;

        let svc = service(&db);
        let first = svc.get_collection(list.id, Page { offset: 0, limit: 10 }).await?;
        assert_eq!(first.total, 25);
        assert_eq!(first.companies.len(), 10);

        let third = svc.get_collection(list.id, Page { offset: 20, limit: 10 }).await?;
        assert_eq!(third.total, 25);
        assert_eq!(third.companies.iter().map(|c| c.id).collect::<Vec<_>>(), ids[20..].to_vec());

        let beyond = svc.get_collection(list.id, Page { offset: 25, limit: 10 }).await?;
        assert!(beyond.companies.is_empty());
        assert_eq!(beyond.total, 25);
        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_collection_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let res = service(&db).get_collection(Uuid::new_v4(), Page::default()).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn get_with_zero_limit_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let liked = liked_list_id(&db).await?;
        let res = service(&db).get_collection(liked, Page { offset: 0, limit: 0 }).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn get_with_offset_beyond_i64_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let liked = liked_list_id(&db).await?;
        let res = service(&db).get_collection(liked, Page { offset: u64::MAX, limit: 10 }).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_collection_wins_over_bad_page() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let res = service(&db).get_collection(Uuid::new_v4(), Page { offset: 0, limit: 0 }).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn move_only_touches_source_members() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ids = seed_companies(&db, "mv", 3).await?;
        let a = company_collection::create(&db, "A").await?;
        let b = company_collection::create(&db, "B").await?;
        association::create_many(&db, &ids[..2], a.id).await?;

        let moved = service(&db).move_companies(a.id, b.id, &ids).await?;
        assert_eq!(moved, 2);
        assert!(sorted_ids(&db, a.id).await?.is_empty());
        assert_eq!(sorted_ids(&db, b.id).await?, ids[..2].to_vec());

        // already moved: nothing left to move
        let again = service(&db).move_companies(a.id, b.id, &ids).await?;
        assert_eq!(again, 0);
        Ok(())
    }

    #[tokio::test]
    async fn move_with_missing_collection_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ids = seed_companies(&db, "nf", 2).await?;
        let a = company_collection::create(&db, "A").await?;
        association::create_many(&db, &ids, a.id).await?;
        let svc = service(&db);

        match svc.move_companies(a.id, Uuid::new_v4(), &ids).await {
            Err(ServiceError::NotFound(msg)) => assert!(msg.starts_with("Destination collection")),
            other => panic!("expected NotFound, got {other:?}"),
        }
        match svc.move_all_companies(Uuid::new_v4(), a.id).await {
            Err(ServiceError::NotFound(msg)) => assert!(msg.starts_with("Source collection")),
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert_eq!(sorted_ids(&db, a.id).await?, ids);
        Ok(())
    }

    #[tokio::test]
    async fn failed_move_rolls_back_everything() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ids = seed_companies(&db, "rb", 3).await?;
        let a = company_collection::create(&db, "A").await?;
        let b = company_collection::create(&db, "B").await?;
        association::create_many(&db, &ids, a.id).await?;
        // ids[2] is already in B, moving it again would duplicate the pair
        association::create(&db, ids[2], b.id).await?;

        let res = service(&db).move_companies(a.id, b.id, &ids).await;
        assert!(matches!(res, Err(ServiceError::Db(_))));
        assert_eq!(sorted_ids(&db, a.id).await?, ids);
        assert_eq!(sorted_ids(&db, b.id).await?, vec![ids[2]]);
        Ok(())
    }

    #[tokio::test]
    async fn move_all_skips_companies_already_in_destination() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ids = seed_companies(&db, "all", 5).await?;
        let a = company_collection::create(&db, "A").await?;
        let b = company_collection::create(&db, "B").await?;
        association::create_many(&db, &ids, a.id).await?;
        association::create(&db, ids[4], b.id).await?;

        let moved = service(&db).move_all_companies(a.id, b.id).await?;
        assert_eq!(moved, 4);
        // the shared company stays in the source, and is not duplicated in the destination
        assert_eq!(sorted_ids(&db, a.id).await?, vec![ids[4]]);
        assert_eq!(sorted_ids(&db, b.id).await?, ids);
        Ok(())
    }

    #[tokio::test]
    async fn move_all_crosses_batch_threshold() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ids = seed_companies(&db, "bulk", 1500).await?;
        let a = company_collection::create(&db, "A").await?;
        let b = company_collection::create(&db, "B").await?;
        association::create_many(&db, &ids[..750], a.id).await?;
        association::create_many(&db, &ids[750..], a.id).await?;

        let moved = service(&db).move_all_companies(a.id, b.id).await?;
        assert_eq!(moved, 1500);
        assert!(sorted_ids(&db, a.id).await?.is_empty());
        assert_eq!(sorted_ids(&db, b.id).await?.len(), 1500);
        Ok(())
    }

    #[tokio::test]
    async fn move_all_with_small_batches() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ids = seed_companies(&db, "small", 23).await?;
        let a = company_collection::create(&db, "A").await?;
        let b = company_collection::create(&db, "B").await?;
        association::create_many(&db, &ids, a.id).await?;

        let cfg = CollectionsConfig { move_batch_size: 7, ..CollectionsConfig::default() };
        let moved = service_with(&db, cfg).move_all_companies(a.id, b.id).await?;
        assert_eq!(moved, 23);
        assert_eq!(sorted_ids(&db, b.id).await?, ids);
        Ok(())
    }

    #[tokio::test]
    async fn move_all_failure_in_late_batch_rolls_back_earlier_batches() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ids = seed_companies(&db, "late", 5).await?;
        let a = company_collection::create(&db, "A").await?;
        let b = company_collection::create(&db, "B").await?;
        association::create_many(&db, &ids, a.id).await?;
        // batches of 2 are [0,1] [2,3] [4]; the last one fails
        db.execute_unprepared(&format!(
            "CREATE TRIGGER reject_last_move BEFORE UPDATE ON company_collection_associations \
             WHEN NEW.company_id = {} BEGIN SELECT RAISE(ABORT, 'rejected'); END",
            ids[4]
        ))
        .await?;

        let cfg = CollectionsConfig { move_batch_size: 2, ..CollectionsConfig::default() };
        let res = service_with(&db, cfg).move_all_companies(a.id, b.id).await;
        assert!(matches!(res, Err(ServiceError::Db(_))));
        assert_eq!(sorted_ids(&db, a.id).await?, ids);
        assert!(sorted_ids(&db, b.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn moved_companies_leave_worklist_once_liked() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ids = seed_companies(&db, "flow", 4).await?;
        let my_list = company_collection::create(&db, "My Worklist").await?;
        let liked = liked_list_id(&db).await?;
        association::create_many(&db, &ids, my_list.id).await?;
        let svc = service(&db);

        let moved = svc.move_companies(my_list.id, liked, &ids[..2]).await?;
        assert_eq!(moved, 2);

        let worklist = svc.get_collection(my_list.id, Page::default()).await?;
        assert_eq!(worklist.companies.iter().map(|c| c.id).collect::<Vec<_>>(), ids[2..].to_vec());
        let liked_page = svc.get_collection(liked, Page::default()).await?;
        assert_eq!(liked_page.total, 2);
        assert!(liked_page.companies.iter().all(|c| c.liked));
        Ok(())
    }
}
