use super::*;

/// Tests creating and incrementing a middleman counter.
///
/// Expected: completed count 2 and last week stored
#[tokio::test]
async fn increments_and_records_week() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Middleman)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MiddlemanRepository::new(db);
    repo.increment(9, 10).await?;
    repo.increment(9, 11).await?;

    assert_eq!(repo.get_completed(9).await?, 2);

    let stored = entity::prelude::Middleman::find()
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.week, 11);

    Ok(())
}

/// Tests the middleman leaderboard ordering and reset.
///
/// Expected: ranked by completed tickets, then all zero after reset
#[tokio::test]
async fn ranks_and_resets() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Middleman)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_middleman(db, "1", 2).await?;
    factory::create_middleman(db, "2", 6).await?;

    let repo = MiddlemanRepository::new(db);
    let top = repo.top(10).await?;
    assert_eq!(top[0].user_id, 2);

    repo.reset_all().await?;
    assert_eq!(repo.get_completed(2).await?, 0);

    Ok(())
}


/// Tests two first completions for the same middleman landing at once.
///
/// Expected: both succeed and the count is 2
#[tokio::test]
async fn concurrent_first_increments_both_count() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Middleman)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MiddlemanRepository::new(db);
    let (first, second) = tokio::join!(repo.increment(9, 10), repo.increment(9, 10));
    first?;
    second?;

    assert_eq!(repo.get_completed(9).await?, 2);

    Ok(())
}
