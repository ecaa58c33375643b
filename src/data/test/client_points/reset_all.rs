use super::*;

/// Tests that reset zeroes counts without deleting rows.
///
/// Expected: every record still present with 0 points
#[tokio::test]
async fn zeroes_without_deleting() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ClientPoints)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_client_points(db, "1", 4).await?;
    factory::create_client_points(db, "2", 9).await?;

    let repo = ClientPointsRepository::new(db);
    let reset = repo.reset_all().await?;

    assert_eq!(reset, 2);
    let top = repo.top(10).await?;
    assert_eq!(top.len(), 2);
    assert!(top.iter().all(|e| e.count == 0));

    Ok(())
}
