use super::*;

/// Tests sweeping a record from last week.
///
/// Expected: week W-1 count 5 becomes count 0 week W
#[tokio::test]
async fn zeroes_stale_week() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::WeeklyQuota)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_weekly_quota(db, "9", 5, 19).await?;

    let repo = WeeklyQuotaRepository::new(db);
    let rolled = repo.rollover(20).await?;

    assert_eq!(rolled, 1);
    let record = repo.find_by_user_id(9).await?.unwrap();
    assert_eq!(record.completed, 0);
    assert_eq!(record.week, 20);

    Ok(())
}

/// Tests that the sweep never erases a count recorded this week.
///
/// Expected: a completion in week W survives a sweep for week W
#[tokio::test]
async fn keeps_current_week_completion() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::WeeklyQuota)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_weekly_quota(db, "9", 5, 19).await?;

    let repo = WeeklyQuotaRepository::new(db);
    repo.record_completion(9, 20).await?;
    let rolled = repo.rollover(20).await?;

    assert_eq!(rolled, 0);
    let record = repo.find_by_user_id(9).await?.unwrap();
    assert_eq!(record.completed, 1);
    assert_eq!(record.week, 20);

    Ok(())
}
