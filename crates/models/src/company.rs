use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{company_collection_association, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_name: String,
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

pub async fn create<C: ConnectionTrait>(db: &C, company_name: &str) -> Result<Model, errors::ModelError> {
    if company_name.trim().is_empty() { return Err(errors::ModelError::Validation("company_name required".into())); }
    let am = ActiveModel {
        company_name: Set(company_name.to_string()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
