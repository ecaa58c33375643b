use super::*;

/// Tests ordering by points with ties kept in insertion order.
///
/// Expected: 7, then the two 3-point users in the order they were created
#[tokio::test]
async fn sorts_descending_with_stable_ties() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ClientPoints)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_client_points(db, "10", 3).await?;
    factory::create_client_points(db, "11", 7).await?;
    factory::create_client_points(db, "12", 3).await?;

    let repo = ClientPointsRepository::new(db);
    let top = repo.top(10).await?;

    let ids: Vec<u64> = top.iter().map(|e| e.user_id).collect();
    assert_eq!(ids, vec![11, 10, 12]);

    Ok(())
}

/// Tests that the limit caps the result.
///
/// Expected: only the highest two rows
#[tokio::test]
async fn respects_limit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ClientPoints)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for points in 1..=4 {
        factory::client_points::ClientPointsFactory::new(db)
            .points(points)
            .build()
            .await?;
    }

    let repo = ClientPointsRepository::new(db);
    let top = repo.top(2).await?;

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].count, 4);
    assert_eq!(top[1].count, 3);

    Ok(())
}
