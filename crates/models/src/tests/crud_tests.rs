use super::setup_test_db;
use crate::{company, company_collection, company_collection_association};
use sea_orm::{EntityTrait, QueryFilter, ColumnTrait, PaginatorTrait};
use anyhow::Result;
use uuid::Uuid;

/// Seed migration creates the two well-known collections
#[tokio::test]
async fn test_seed_collections_present() -> Result<()> {
    let db = setup_test_db().await?;

    let all = company_collection::Entity::find().all(&db).await?;
    let names: Vec<&str> = all.iter().map(|c| c.collection_name.as_str()).collect();
    assert_eq!(all.len(), 2);
    assert!(names.contains(&"My List"));
    assert!(names.contains(&"Liked Companies List"));

    let liked = company_collection::find_by_name(&db, "Liked Companies List").await?;
    assert!(liked.is_some());
    Ok(())
}

/// Test company CRUD operations
#[tokio::test]
async fn test_company_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let created = company::create(&db, "Acme Robotics").await?;
    assert_eq!(created.company_name, "Acme Robotics");

    let found = company::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.map(|c| c.company_name), Some("Acme Robotics".to_string()));

    company::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(company::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_company_create_rejects_blank_name() -> Result<()> {
    let db = setup_test_db().await?;
    let res = company::create(&db, "   ").await;
    assert!(matches!(res, Err(crate::errors::ModelError::Validation(_))));
    Ok(())
}

/// Test collection lookup by id and by name
#[tokio::test]
async fn test_collection_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let name = format!("collection_{}", Uuid::new_v4());
    let created = company_collection::create(&db, &name).await?;

    let by_id = company_collection::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(by_id.map(|c| c.collection_name), Some(name.clone()));

    let by_name = company_collection::find_by_name(&db, &name).await?;
    assert_eq!(by_name.map(|c| c.id), Some(created.id));

    assert!(company_collection::find_by_name(&db, "does not exist").await?.is_none());
    Ok(())
}

/// Associations link companies to collections and can be listed per collection
#[tokio::test]
async fn test_association_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let list = company_collection::create(&db, "Worklist").await?;
    let a = company::create(&db, "Alpha").await?;
    let b = company::create(&db, "Beta").await?;
    let c = company::create(&db, "Gamma").await?;

    let single = company_collection_association::create(&db, a.id, list.id).await?;
    assert_eq!(single.collection_id, list.id);
    let written = company_collection_association::create_many(&db, &[b.id, c.id], list.id).await?;
    assert_eq!(written, 2);
    assert_eq!(company_collection_association::create_many(&db, &[], list.id).await?, 0);

    let mut ids = company_collection_association::company_ids_in(&db, list.id).await?;
    ids.sort();
    assert_eq!(ids, vec![a.id, b.id, c.id]);

    let count = company_collection_association::Entity::find()
        .filter(company_collection_association::Column::CollectionId.eq(list.id))
        .count(&db)
        .await?;
    assert_eq!(count, 3);

    // joined lookup through the relation
    let with_company = company_collection_association::Entity::find_by_id(single.id)
        .find_also_related(company::Entity)
        .one(&db)
        .await?;
    let (_, joined) = with_company.expect("association exists");
    assert_eq!(joined.map(|c| c.company_name), Some("Alpha".to_string()));
    Ok(())
}
