use super::*;

/// Tests claiming an unclaimed ticket.
///
/// Expected: Ok(true) and the assignee is stored
#[tokio::test]
async fn claims_unclaimed_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ticket = factory::create_ticket(db).await?;
    let channel_id: u64 = ticket.channel_id.parse().unwrap();

    let repo = TicketRepository::new(db);
    let claimed = repo.claim(channel_id, 77).await?;

    assert!(claimed);
    let stored = repo.find_by_channel_id(channel_id).await?.unwrap();
    assert_eq!(stored.claimed_by, Some(77));

    Ok(())
}

/// Tests that a second claim leaves the first assignee in place.
///
/// Expected: Ok(false) and the original assignee is unchanged
#[tokio::test]
async fn second_claim_keeps_original_assignee() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ticket = factory::ticket::TicketFactory::new(db)
        .claimed_by(Some("77"))
        .build()
        .await?;
    let channel_id: u64 = ticket.channel_id.parse().unwrap();

    let repo = TicketRepository::new(db);
    let claimed = repo.claim(channel_id, 88).await?;

    assert!(!claimed);
    let stored = repo.find_by_channel_id(channel_id).await?.unwrap();
    assert_eq!(stored.claimed_by, Some(77));

    Ok(())
}

/// Tests claiming a channel that has no ticket.
///
/// Expected: Ok(false)
#[tokio::test]
async fn claim_missing_ticket_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);

    assert!(!repo.claim(404, 77).await?);

    Ok(())
}
