use super::*;
use crate::{
    config::tests::test_config,
    data::weekly_quota::WeeklyQuotaRepository,
    service::{leaderboard::UpsertOutcome, quota::{self, QuotaService}},
    util::week::current_week,
};
use test_utils::{builder::TestBuilder, factory};

/// Tests the quota board for the middleman role.
///
/// Expected: members at the goal listed as completed, stale weeks count as zero
#[tokio::test]
async fn posts_board_to_quota_channel() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let week = current_week();
    factory::weekly_quota::create_weekly_quota(db, "1", 5, week).await?;
    factory::weekly_quota::create_weekly_quota(db, "2", 2, week).await?;
    factory::weekly_quota::create_weekly_quota(db, "3", 9, week - 1).await?;
    let platform = MockPlatform::with_state(|state| state.role_members = vec![1, 2, 3]);
    let mut config = test_config();
    config.quota_channel_id = Some(9);

    let outcome = QuotaService::new(db, &platform, &config)
        .post_board()
        .await?
        .unwrap();

    assert!(matches!(outcome, UpsertOutcome::Created { channel_id: 9, .. }));
    let sent = platform.sent_to(9);
    let description = sent[0]["embeds"][0]["description"].as_str().unwrap();
    assert!(description.contains("**#1** <@1> — **5 tickets**"));
    assert!(description.contains("**#2** <@2> — **2 / 5**"));
    assert!(description.contains("**#3** <@3> — **0 / 5**"));

    Ok(())
}

/// Tests the board without a quota channel configured.
///
/// Expected: nothing posted
#[tokio::test]
async fn skips_board_without_channel() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();

    let outcome = QuotaService::new(db, &platform, &config).post_board().await?;

    assert!(outcome.is_none());
    assert_eq!(platform.sent_count(), 0);

    Ok(())
}

/// Tests a completion recorded before the daily sweep in the same week.
///
/// Expected: the sweep leaves the fresh count alone
#[tokio::test]
async fn sweep_keeps_current_week_completion() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::weekly_quota::create_weekly_quota(db, "4", 3, current_week() - 1).await?;

    quota::record_completion(db, 4).await?;
    let rolled = quota::rollover_check(db).await?;

    assert_eq!(rolled, 0);
    let record = WeeklyQuotaRepository::new(db)
        .find_by_user_id(4)
        .await?
        .unwrap();
    assert_eq!(record.completed, 1);
    assert_eq!(record.week, current_week());

    Ok(())
}
