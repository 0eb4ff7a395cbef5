use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;
use uuid::Uuid;

/// The two collections every deployment starts with.
const SEED_COLLECTIONS: [&str; 2] = ["My List", "Liked Companies List"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(CompanyCollections::Table)
            .columns([CompanyCollections::Id, CompanyCollections::CollectionName]);
        for name in SEED_COLLECTIONS {
            insert
                .values([Uuid::new_v4().into(), name.into()])
                .map_err(|e| DbErr::Custom(e.to_string()))?;
        }
        let db = manager.get_connection();
        db.execute(db.get_database_backend().build(&insert)).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(CompanyCollections::Table)
            .and_where(Expr::col(CompanyCollections::CollectionName).is_in(SEED_COLLECTIONS))
            .to_owned();
        let db = manager.get_connection();
        db.execute(db.get_database_backend().build(&delete)).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum CompanyCollections { Table, Id, CollectionName }
