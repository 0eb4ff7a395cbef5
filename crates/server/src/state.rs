use std::sync::Arc;

use configs::CollectionsConfig;
use sea_orm::DatabaseConnection;
use service::collections::CollectionService;
use service::companies::SeaOrmCompanyCatalog;
use service::liked::LikedCollection;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub collections: Arc<CollectionService<SeaOrmCompanyCatalog>>,
    pub catalog: Arc<SeaOrmCompanyCatalog>,
    pub default_page_size: u64,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &CollectionsConfig) -> Self {
        let liked = Arc::new(LikedCollection::new(cfg.liked_collection_name.clone()));
        let catalog = Arc::new(SeaOrmCompanyCatalog::new(db.clone(), Arc::clone(&liked)));
        let collections = Arc::new(CollectionService::new(db, liked, Arc::clone(&catalog), cfg));
        Self { collections, catalog, default_page_size: cfg.default_page_size }
    }
}
