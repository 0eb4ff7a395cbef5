use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{company_collection_association, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company_collections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub collection_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Association,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Association => Entity::has_many(company_collection_association::Entity).into(),
        }
    }
}

impl Related<company_collection_association::Entity> for Entity {
    fn to() -> RelationDef { Relation::Association.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, collection_name: &str) -> Result<Model, errors::ModelError> {
    if collection_name.trim().is_empty() { return Err(errors::ModelError::Validation("collection_name required".into())); }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        collection_name: Set(collection_name.to_string()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_name<C: ConnectionTrait>(db: &C, collection_name: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::CollectionName.eq(collection_name))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
