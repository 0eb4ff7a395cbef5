use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompanyCollections::Table)
                    .if_not_exists()
                    .col(uuid(CompanyCollections::Id).primary_key())
                    .col(string(CompanyCollections::CollectionName))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CompanyCollections::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CompanyCollections {
    Table,
    Id,
    CollectionName,
}
