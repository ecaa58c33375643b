use super::*;

/// Tests the first completion of a middleman.
///
/// Expected: record created with count 1 in the given week
#[tokio::test]
async fn creates_record_for_new_middleman() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::WeeklyQuota)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WeeklyQuotaRepository::new(db);
    repo.record_completion(9, 20).await?;

    let record = repo.find_by_user_id(9).await?.unwrap();
    assert_eq!(record.completed, 1);
    assert_eq!(record.week, 20);

    Ok(())
}

/// Tests a completion in the same week.
///
/// Expected: count incremented, week unchanged
#[tokio::test]
async fn increments_within_same_week() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::WeeklyQuota)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_weekly_quota(db, "9", 3, 20).await?;

    let repo = WeeklyQuotaRepository::new(db);
    repo.record_completion(9, 20).await?;

    let record = repo.find_by_user_id(9).await?.unwrap();
    assert_eq!(record.completed, 4);
    assert_eq!(record.week, 20);

    Ok(())
}

/// Tests a completion after the week changed.
///
/// Expected: record reset to {completed: 1, week: current}
#[tokio::test]
async fn restarts_count_in_new_week() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::WeeklyQuota)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_weekly_quota(db, "9", 6, 19).await?;

    let repo = WeeklyQuotaRepository::new(db);
    repo.record_completion(9, 20).await?;

    let record = repo.find_by_user_id(9).await?.unwrap();
    assert_eq!(record.completed, 1);
    assert_eq!(record.week, 20);

    Ok(())
}

/// Tests two first completions for the same middleman landing at once.
///
/// Expected: both succeed and the week's count is 2
#[tokio::test]
async fn concurrent_first_completions_both_count() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::WeeklyQuota)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WeeklyQuotaRepository::new(db);
    let (first, second) = tokio::join!(
        repo.record_completion(77, 20),
        repo.record_completion(77, 20)
    );
    first?;
    second?;

    let record = repo.find_by_user_id(77).await?.unwrap();
    assert_eq!(record.completed, 2);
    assert_eq!(record.week, 20);

    Ok(())
}
