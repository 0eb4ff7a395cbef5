use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CompanyCollectionAssociations::Table)
                    .if_not_exists()
                    .col(pk_auto(CompanyCollectionAssociations::Id))
                    .col(integer(CompanyCollectionAssociations::CompanyId))
                    .col(uuid(CompanyCollectionAssociations::CollectionId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_association_company")
                            .from(CompanyCollectionAssociations::Table, CompanyCollectionAssociations::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_association_collection")
                            .from(CompanyCollectionAssociations::Table, CompanyCollectionAssociations::CollectionId)
                            .to(CompanyCollections::Table, CompanyCollections::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CompanyCollectionAssociations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CompanyCollectionAssociations {
    Table,
    Id,
    CompanyId,
    CollectionId,
}

#[derive(DeriveIden)]
enum Companies { Table, Id }

#[derive(DeriveIden)]
enum CompanyCollections { Table, Id }
