use super::*;

/// Tests that the first increment creates the record.
///
/// Expected: 1 point after a single increment
#[tokio::test]
async fn creates_record_on_first_increment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ClientPoints)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ClientPointsRepository::new(db);
    repo.increment(42).await?;

    assert_eq!(repo.get_points(42).await?, 1);

    Ok(())
}

/// Tests that N increments rank the user by exactly N.
///
/// Expected: top() reports the user with a count of 5
#[tokio::test]
async fn n_increments_rank_user_by_n() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ClientPoints)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ClientPointsRepository::new(db);
    for _ in 0..5 {
        repo.increment(42).await?;
    }
    repo.increment(43).await?;

    let top = repo.top(10).await?;

    assert_eq!(top[0].user_id, 42);
    assert_eq!(top[0].count, 5);
    assert_eq!(top[1].count, 1);

    Ok(())
}

/// Tests reading points for a user without a record.
///
/// Expected: 0
#[tokio::test]
async fn missing_user_has_zero_points() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ClientPoints)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_client_points(db, "1", 3).await?;

    let repo = ClientPointsRepository::new(db);

    assert_eq!(repo.get_points(2).await?, 0);

    Ok(())
}

/// Tests concurrent first increments for the same client.
///
/// Expected: no unique-constraint failure, 3 points
#[tokio::test]
async fn concurrent_increments_are_not_lost() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ClientPoints)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ClientPointsRepository::new(db);
    let (a, b, c) = tokio::join!(repo.increment(42), repo.increment(42), repo.increment(42));
    a?;
    b?;
    c?;

    assert_eq!(repo.get_points(42).await?, 3);

    Ok(())
}
