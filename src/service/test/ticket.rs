use super::*;
use crate::{
    config::tests::test_config,
    data::{
        client_points::ClientPointsRepository, middleman::MiddlemanRepository,
        ticket::TicketRepository, weekly_quota::WeeklyQuotaRepository,
    },
    error::ticket::TicketError,
    model::ticket::TradeDetails,
    service::ticket::{TicketRequest, TicketService},
    util::week::current_week,
};
use sea_orm::EntityTrait;
use test_utils::builder::TestBuilder;

fn request(requester_id: u64, counterparty_id: Option<u64>) -> TicketRequest {
    TicketRequest {
        requester_id,
        requester_name: "trader".to_string(),
        counterparty_id,
        details: TradeDetails {
            trade: "Harvester for 1000 Robux".to_string(),
            side1: "Harvester".to_string(),
            side2: "1000 Robux".to_string(),
        },
    }
}

/// Tests opening a ticket for a requester with a counterparty.
///
/// Expected: channel created for both traders, record stored, intro posted
#[tokio::test]
async fn creates_channel_record_and_intro() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();

    let channel_id = TicketService::new(db, &platform, &config)
        .create_ticket(request(1, Some(2)))
        .await?;

    let stored = TicketRepository::new(db)
        .find_by_channel_id(channel_id)
        .await?
        .unwrap();
    assert_eq!(stored.participants(), vec![1, 2]);

    let state = platform.state.lock().unwrap();
    assert_eq!(state.created_channels.len(), 1);
    assert_eq!(state.created_channels[0].category_id, config.ticket_category_id);
    assert_eq!(state.created_channels[0].counterparty_id, Some(2));
    drop(state);

    let intro = platform.sent_to(channel_id);
    assert_eq!(intro.len(), 1);
    assert_eq!(embed_titles(&intro[0]), vec!["• TRADE •".to_string()]);

    Ok(())
}

/// Tests that a requester with a visible ticket channel cannot open another.
///
/// Expected: DuplicateOpenTicket, no channel created, nothing stored
#[tokio::test]
async fn duplicate_request_creates_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::with_state(|state| {
        state.open_ticket_channels.insert(1, 500);
    });
    let config = test_config();

    let result = TicketService::new(db, &platform, &config)
        .create_ticket(request(1, None))
        .await;

    assert!(matches!(
        result,
        Err(AppError::Ticket(TicketError::DuplicateOpenTicket { channel_id: 500 }))
    ));
    assert!(platform.state.lock().unwrap().created_channels.is_empty());
    assert!(entity::prelude::Ticket::find().all(db).await?.is_empty());

    Ok(())
}

/// Tests that a channel is removed when its record cannot be stored.
///
/// Expected: error returned and the created channel deleted
#[tokio::test]
async fn failed_insert_removes_channel() -> Result<(), AppError> {
    // No ticket table, so the insert fails.
    let test = TestBuilder::new()
        .with_table(entity::prelude::ClientPoints)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();

    let result = TicketService::new(db, &platform, &config)
        .create_ticket(request(1, Some(2)))
        .await;

    assert!(matches!(result, Err(AppError::DbErr(_))));
    let state = platform.state.lock().unwrap();
    assert_eq!(state.created_channels.len(), 1);
    assert_eq!(state.deleted_channels.len(), 1);
    assert!(state.sent.is_empty());

    Ok(())
}

/// Tests a requester naming themselves as the counterparty.
///
/// Expected: ticket stored with a single participant
#[tokio::test]
async fn self_counterparty_is_dropped() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();

    let channel_id = TicketService::new(db, &platform, &config)
        .create_ticket(request(1, Some(1)))
        .await?;

    let stored = TicketRepository::new(db)
        .find_by_channel_id(channel_id)
        .await?
        .unwrap();
    assert_eq!(stored.participants(), vec![1]);

    Ok(())
}

/// Tests the full create, claim and close flow.
///
/// Expected: assignee credited with one completed ticket and one quota
/// completion in the current week
#[tokio::test]
async fn close_credits_assignee_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();
    let service = TicketService::new(db, &platform, &config);

    let channel_id = service.create_ticket(request(1, Some(2))).await?;
    let claimed = service.claim(channel_id, 7).await?;
    assert_eq!(claimed.claimed_by, Some(7));

    service.close(channel_id, "Moderator").await?;
    // Closing again re-posts the panel without crediting twice.
    service.close(channel_id, "Moderator").await?;

    assert_eq!(MiddlemanRepository::new(db).get_completed(7).await?, 1);
    let quota = WeeklyQuotaRepository::new(db)
        .find_by_user_id(7)
        .await?
        .unwrap();
    assert_eq!(quota.completed, 1);
    assert_eq!(quota.week, current_week());

    let state = platform.state.lock().unwrap();
    assert!(state
        .member_access
        .contains(&(channel_id, 1, ChannelAccess::Hidden)));
    assert!(state
        .member_access
        .contains(&(channel_id, 2, ChannelAccess::Hidden)));

    Ok(())
}

/// Tests closing two tickets of the same new middleman at once.
///
/// Expected: both closes succeed and the middleman is credited twice
#[tokio::test]
async fn concurrent_closes_credit_each_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();
    let service = TicketService::new(db, &platform, &config);

    let first = service.create_ticket(request(1, Some(2))).await?;
    let second = service.create_ticket(request(3, Some(4))).await?;
    service.claim(first, 7).await?;
    service.claim(second, 7).await?;

    let (a, b) = tokio::join!(
        service.close(first, "Moderator"),
        service.close(second, "Moderator")
    );
    a?;
    b?;

    assert_eq!(MiddlemanRepository::new(db).get_completed(7).await?, 2);
    let quota = WeeklyQuotaRepository::new(db)
        .find_by_user_id(7)
        .await?
        .unwrap();
    assert_eq!(quota.completed, 2);

    Ok(())
}

/// Tests claiming narrows posting to the assignee.
///
/// Expected: traders read-only, assignee read/write
#[tokio::test]
async fn claim_narrows_permissions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();
    let service = TicketService::new(db, &platform, &config);

    let channel_id = service.create_ticket(request(1, Some(2))).await?;
    service.claim(channel_id, 7).await?;

    let state = platform.state.lock().unwrap();
    assert_eq!(
        state.member_access,
        vec![
            (channel_id, 1, ChannelAccess::ReadOnly),
            (channel_id, 2, ChannelAccess::ReadOnly),
            (channel_id, 7, ChannelAccess::ReadWrite),
        ]
    );
    // Staff role defaults to the middleman role, so no role swap.
    assert!(state.role_access.is_empty());

    Ok(())
}

/// Tests a second middleman claiming a claimed ticket.
///
/// Expected: AlreadyClaimed naming the first assignee, who stays assigned
#[tokio::test]
async fn second_claim_is_refused() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();
    let service = TicketService::new(db, &platform, &config);

    let channel_id = service.create_ticket(request(1, None)).await?;
    service.claim(channel_id, 7).await?;
    let result = service.claim(channel_id, 8).await;

    assert!(matches!(
        result,
        Err(AppError::Ticket(TicketError::AlreadyClaimed { assignee_id: 7 }))
    ));
    assert_eq!(service.get(channel_id).await?.claimed_by, Some(7));

    Ok(())
}

/// Tests logging points twice for the same ticket.
///
/// Expected: each trader ends with two points
#[tokio::test]
async fn log_points_is_not_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();
    let service = TicketService::new(db, &platform, &config);

    let channel_id = service.create_ticket(request(1, Some(2))).await?;
    let first = service.log_points(channel_id).await?;
    service.log_points(channel_id).await?;

    assert_eq!(first, vec![1, 2]);
    let points = ClientPointsRepository::new(db);
    assert_eq!(points.get_points(1).await?, 2);
    assert_eq!(points.get_points(2).await?, 2);

    Ok(())
}

/// Tests logging points for a channel that is not a ticket.
///
/// Expected: TicketNotFound
#[tokio::test]
async fn log_points_requires_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();

    let result = TicketService::new(db, &platform, &config)
        .log_points(12345)
        .await;

    assert!(matches!(
        result,
        Err(AppError::Ticket(TicketError::TicketNotFound))
    ));

    Ok(())
}

/// Tests reopening a closed ticket.
///
/// Expected: traders regain read/write access and the record is open again
#[tokio::test]
async fn reopen_restores_access() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();
    let service = TicketService::new(db, &platform, &config);

    let channel_id = service.create_ticket(request(1, Some(2))).await?;
    service.close(channel_id, "Moderator").await?;
    let restored = service.reopen(channel_id).await?;

    assert_eq!(restored, vec![1, 2]);
    assert!(!service.get(channel_id).await?.is_closed());
    assert!(platform
        .state
        .lock()
        .unwrap()
        .member_access
        .ends_with(&[
            (channel_id, 1, ChannelAccess::ReadWrite),
            (channel_id, 2, ChannelAccess::ReadWrite),
        ]));

    Ok(())
}

/// Tests the trade questionnaire on a ticket without a counterparty.
///
/// Expected: BadRequest and nothing posted
#[tokio::test]
async fn trade_format_needs_both_traders() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();
    let service = TicketService::new(db, &platform, &config);

    let channel_id = service.create_ticket(request(1, None)).await?;
    let sent_before = platform.sent_count();
    let result = service.post_trade_format(channel_id).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(platform.sent_count(), sent_before);

    Ok(())
}

/// Tests dropping records when channels are deleted.
///
/// Expected: a ticket's record is removed wherever its channel lived, and a
/// channel without a record is not an error
#[tokio::test]
async fn deleted_channel_drops_record() -> Result<(), AppError> {
    let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = MockPlatform::new();
    let config = test_config();
    let service = TicketService::new(db, &platform, &config);

    let channel_id = service.create_ticket(request(1, Some(2))).await?;
    service.delete_ticket_record(channel_id).await?;
    service.delete_ticket_record(424242).await?;

    assert!(TicketRepository::new(db)
        .find_by_channel_id(channel_id)
        .await?
        .is_none());

    Ok(())
}
