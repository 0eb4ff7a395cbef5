use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Association: a company appears at most once per collection
        manager
            .create_index(
                Index::create()
                    .name("uniq_association_company_collection")
                    .table(CompanyCollectionAssociations::Table)
                    .col(CompanyCollectionAssociations::CompanyId)
                    .col(CompanyCollectionAssociations::CollectionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Association: collection membership scans
        manager
            .create_index(
                Index::create()
                    .name("idx_association_collection")
                    .table(CompanyCollectionAssociations::Table)
                    .col(CompanyCollectionAssociations::CollectionId)
                    .to_owned(),
            )
            .await?;

        // Collection: liked list is looked up by name
        manager
            .create_index(
                Index::create()
                    .name("idx_collection_name")
                    .table(CompanyCollections::Table)
                    .col(CompanyCollections::CollectionName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uniq_association_company_collection")
                    .table(CompanyCollectionAssociations::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_association_collection")
                    .table(CompanyCollectionAssociations::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_collection_name").table(CompanyCollections::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CompanyCollectionAssociations { Table, CompanyId, CollectionId }

#[derive(DeriveIden)]
enum CompanyCollections { Table, CollectionName }
