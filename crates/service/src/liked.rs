//! Resolution of the distinguished "liked" collection.
//!
//! The liked list is identified by its configured name. Collections are never
//! renamed or deleted, so the id is cached once it has been found.

use sea_orm::ConnectionTrait;
use tokio::sync::OnceCell;
use tracing::debug;
use uuid::Uuid;

use models::company_collection;

use crate::errors::ServiceError;

#[derive(Debug)]
pub struct LikedCollection {
    name: String,
    id: OnceCell<Uuid>,
}

impl LikedCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), id: OnceCell::new() }
    }

    pub fn is_liked(&self, collection: &company_collection::Model) -> bool {
        collection.collection_name == self.name
    }

    /// Id of the liked collection, or `None` while no such collection exists.
    pub async fn id<C: ConnectionTrait>(&self, db: &C) -> Result<Option<Uuid>, ServiceError> {
        if let Some(id) = self.id.get() {
            return Ok(Some(*id));
        }
        let found = company_collection::find_by_name(db, &self.name).await?;
        Ok(found.map(|c| {
            debug!(liked_collection_id = %c.id, name = %self.name, "resolved liked collection");
            let _ = self.id.set(c.id);
            c.id
        }))
    }
}
