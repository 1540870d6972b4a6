use super::setup_test_db;
use crate::{category, service};
use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};
use anyhow::Result;

/// Test basic transaction commit
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let created = category::create(&txn, "Committed", "committed", None, 1).await?;
    txn.commit().await?;

    let found = category::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());
    Ok(())
}

/// Test transaction rollback
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let db = setup_test_db().await?;

    let txn = db.begin().await?;
    let created = category::create(&txn, "Rolled Back", "rolled-back", None, 1).await?;
    txn.rollback().await?;

    let found = category::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_none());
    Ok(())
}

/// Two display-order updates in one transaction land together
#[tokio::test]
async fn test_two_row_update_is_atomic() -> Result<()> {
    let db = setup_test_db().await?;
    let a = category::create(&db, "A", "a", None, 1).await?;
    let b = category::create(&db, "B", "b", None, 2).await?;

    let txn = db.begin().await?;
    let mut am_a: category::ActiveModel = a.clone().into();
    am_a.display_order = Set(2);
    am_a.update(&txn).await?;
    let mut am_b: category::ActiveModel = b.clone().into();
    am_b.display_order = Set(1);
    am_b.update(&txn).await?;
    txn.rollback().await?;

    let a2 = category::Entity::find_by_id(a.id).one(&db).await?.expect("a");
    let b2 = category::Entity::find_by_id(b.id).one(&db).await?.expect("b");
    assert_eq!((a2.display_order, b2.display_order), (1, 2));
    Ok(())
}

/// The service -> category foreign key restricts category deletion
#[tokio::test]
async fn test_category_with_services_cannot_be_deleted() -> Result<()> {
    let db = setup_test_db().await?;
    let cat = category::create(&db, "Roofing", "roofing", None, 1).await?;
    service::create(&db, service::NewService {
        name: "Shingles".into(),
        slug: "shingles".into(),
        description: "Shingle roof replacement".into(),
        image_url: None,
        is_subcontracted: true,
        category_id: cat.id,
        display_order: 1,
    }).await?;

    let res = category::Entity::delete_by_id(cat.id).exec(&db).await;
    assert!(res.is_err());
    Ok(())
}
