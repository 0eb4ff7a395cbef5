//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied after the tables, seed data last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_company;
mod m20240101_000002_create_company_collection;
mod m20240101_000003_create_company_collection_association;
mod m20240101_000004_add_indexes;
mod m20240101_000005_seed_collections;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_company::Migration),
            Box::new(m20240101_000002_create_company_collection::Migration),
            Box::new(m20240101_000003_create_company_collection_association::Migration),
            Box::new(m20240101_000004_add_indexes::Migration),
            Box::new(m20240101_000005_seed_collections::Migration),
        ]
    }
}
