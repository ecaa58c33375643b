use super::*;
use crate::{
    config::tests::test_config,
    data::{client_points::ClientPointsRepository, leaderboard_message::LeaderboardMessageRepository},
    model::leaderboard::BoardKind,
    service::leaderboard::{
        render::{CLIENT_BOARD_TITLE, MIDDLEMAN_BOARD_TITLE},
        LeaderboardService, UpsertOutcome,
    },
};
use test_utils::builder::TestBuilder;

/// Tests the first refresh of a board in an empty channel.
///
/// Expected: one message sent and remembered
#[tokio::test]
async fn sends_board_when_none_exists() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();

    let outcome = LeaderboardService::new(db, &platform, &config)
        .refresh_clients()
        .await?;

    assert!(matches!(outcome, UpsertOutcome::Created { .. }));
    assert_eq!(platform.sent_count(), 1);
    let remembered = LeaderboardMessageRepository::new(db)
        .get(BoardKind::Clients)
        .await?
        .unwrap();
    assert_eq!(remembered.message_id, outcome.message_id());

    Ok(())
}

/// Tests refreshing twice.
///
/// Expected: the second refresh edits the remembered message
#[tokio::test]
async fn edits_remembered_board() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();
    let service = LeaderboardService::new(db, &platform, &config);

    let first = service.refresh_clients().await?;
    ClientPointsRepository::new(db).increment(1).await?;
    let second = service.refresh_clients().await?;

    assert_eq!(
        second,
        UpsertOutcome::Edited {
            channel_id: config.lb_channel_id,
            message_id: first.message_id()
        }
    );
    assert_eq!(platform.sent_count(), 1);
    assert_eq!(platform.edited_count(), 1);

    Ok(())
}

/// Tests two refreshes of the same board overlapping.
///
/// Expected: both succeed, one message sent and the other refresh edits it
#[tokio::test]
async fn overlapping_refreshes_share_one_board() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();
    let first = LeaderboardService::new(db, &platform, &config);
    let second = LeaderboardService::new(db, &platform, &config);

    let (a, b) = tokio::join!(first.refresh_clients(), second.refresh_clients());
    let (a, b) = (a?, b?);

    assert_eq!(a.message_id(), b.message_id());
    assert_eq!(platform.sent_count(), 1);
    assert_eq!(platform.edited_count(), 1);

    Ok(())
}

/// Tests a board posted before its id was remembered.
///
/// Expected: found by title in recent history and edited, nothing sent
#[tokio::test]
async fn finds_board_by_title() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();
    platform.seed_bot_message(config.mm_lb_channel_id, 42, MIDDLEMAN_BOARD_TITLE);

    let outcome = LeaderboardService::new(db, &platform, &config)
        .refresh_middlemen()
        .await?;

    assert_eq!(
        outcome,
        UpsertOutcome::Edited {
            channel_id: config.mm_lb_channel_id,
            message_id: 42
        }
    );
    assert_eq!(platform.sent_count(), 0);

    Ok(())
}

/// Tests a remembered board message that was deleted.
///
/// Expected: falls back to sending a new board
#[tokio::test]
async fn replaces_deleted_board() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();
    LeaderboardMessageRepository::new(db)
        .upsert(BoardKind::Clients, config.lb_channel_id, 77)
        .await?;

    let outcome = LeaderboardService::new(db, &platform, &config)
        .refresh_clients()
        .await?;

    assert!(matches!(outcome, UpsertOutcome::Created { .. }));
    assert_ne!(outcome.message_id(), 77);

    Ok(())
}

/// Tests that a user's message quoting the board title is not edited.
///
/// Expected: a new board is sent instead
#[tokio::test]
async fn ignores_titles_from_users() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::with_state(|state| {
        state.messages.insert(
            5,
            vec![PostedMessage {
                id: 10,
                author_id: 3,
                from_bot: false,
                embed_titles: vec![CLIENT_BOARD_TITLE.to_string()],
            }],
        );
    });
    let config = test_config();

    let outcome = LeaderboardService::new(db, &platform, &config)
        .refresh_clients()
        .await?;

    assert!(matches!(outcome, UpsertOutcome::Created { .. }));

    Ok(())
}

/// Tests resetting client points.
///
/// Expected: every record zeroed and the board refreshed
#[tokio::test]
async fn reset_zeroes_points() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();
    let points = ClientPointsRepository::new(db);
    points.increment(1).await?;
    points.increment(2).await?;

    let reset = LeaderboardService::new(db, &platform, &config)
        .reset_clients()
        .await?;

    assert_eq!(reset, 2);
    assert_eq!(points.get_points(1).await?, 0);
    assert_eq!(platform.sent_count(), 1);

    Ok(())
}
