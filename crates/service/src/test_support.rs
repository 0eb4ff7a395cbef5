#![cfg(test)]
use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, ColumnTrait, Set};
use migration::MigratorTrait;
use models::{company, company_collection, db::connect_in_memory};
use uuid::Uuid;

/// Fresh in-memory database per test, schema and seed collections applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Insert `n` companies named `{prefix}-{i}` and return their ids in insertion order.
pub async fn seed_companies(db: &DatabaseConnection, prefix: &str, n: usize) -> Result<Vec<i32>, anyhow::Error> {
    let before = company::Entity::find()
        .order_by_desc(company::Column::Id)
        .one(db)
        .await?
        .map(|c| c.id);
    // keep each statement well below SQLite's bind-parameter limit
    let names: Vec<String> = (0..n).map(|i| format!("{prefix}-{i}")).collect();
    for chunk in names.chunks(500) {
        let rows = chunk.iter().map(|name| company::ActiveModel {
            company_name: Set(name.clone()),
            ..Default::default()
        });
        company::Entity::insert_many(rows).exec(db).await?;
    }
    let ids = company::Entity::find()
        .select_only()
        .column(company::Column::Id)
        .filter(company::Column::Id.gt(before.unwrap_or(0)))
        .order_by_asc(company::Column::Id)
        .into_tuple::<i32>()
        .all(db)
        .await?;
    Ok(ids)
}

pub async fn liked_list_id(db: &DatabaseConnection) -> Result<Uuid, anyhow::Error> {
    company_collection::find_by_name(db, "Liked Companies List")
        .await?
        .map(|c| c.id)
        .ok_or_else(|| anyhow::anyhow!("liked list not seeded"))
}
