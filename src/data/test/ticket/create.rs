use super::*;

/// Tests persisting a ticket without a counterparty.
///
/// Expected: Ok with `user2` and `claimed_by` unset
#[tokio::test]
async fn creates_ticket_without_counterparty() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo
        .create(CreateTicketParam {
            channel_id: 500,
            user1: 1,
            user2: None,
            details: TradeDetails {
                trade: "Harvester for Robux".to_string(),
                side1: "Harvester".to_string(),
                side2: "1000 Robux".to_string(),
            },
        })
        .await?;

    assert_eq!(ticket.channel_id, 500);
    assert_eq!(ticket.user1, 1);
    assert_eq!(ticket.user2, None);
    assert_eq!(ticket.claimed_by, None);
    assert!(!ticket.is_closed());

    let stored = entity::prelude::Ticket::find_by_id("500".to_string())
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.user1, "1");
    assert_eq!(stored.trade, "Harvester for Robux");

    Ok(())
}

/// Tests that a second ticket for the same channel is rejected.
///
/// Expected: Err from the primary key constraint
#[tokio::test]
async fn rejects_duplicate_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .channel_id("500")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let result = repo
        .create(CreateTicketParam {
            channel_id: 500,
            user1: 2,
            user2: None,
            details: TradeDetails::default(),
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
