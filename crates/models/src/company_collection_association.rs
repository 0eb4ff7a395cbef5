use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{company, company_collection, errors};

/// Join row placing a company in a collection. `(company_id, collection_id)` is unique.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company_collection_associations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_id: i32,
    pub collection_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Company, Collection }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity).from(Column::CompanyId).to(company::Column::Id).into(),
            Relation::Collection => Entity::belongs_to(company_collection::Entity).from(Column::CollectionId).to(company_collection::Column::Id).into(),
        }
    }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl Related<company_collection::Entity> for Entity {
    fn to() -> RelationDef { Relation::Collection.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, company_id: i32, collection_id: Uuid) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        company_id: Set(company_id),
        collection_id: Set(collection_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Bulk insert of `company_ids` into one collection; returns the number of rows written.
pub async fn create_many<C: ConnectionTrait>(db: &C, company_ids: &[i32], collection_id: Uuid) -> Result<u64, errors::ModelError> {
    if company_ids.is_empty() { return Ok(0); }
    let rows = company_ids.iter().map(|&company_id| ActiveModel {
        company_id: Set(company_id),
        collection_id: Set(collection_id),
        ..Default::default()
    });
    Entity::insert_many(rows).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(company_ids.len() as u64)
}

/// Company ids currently placed in `collection_id`, ascending.
pub async fn company_ids_in<C: ConnectionTrait>(db: &C, collection_id: Uuid) -> Result<Vec<i32>, errors::ModelError> {
    Entity::find()
        .select_only()
        .column(Column::CompanyId)
        .filter(Column::CollectionId.eq(collection_id))
        .order_by_asc(Column::CompanyId)
        .into_tuple::<i32>()
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
