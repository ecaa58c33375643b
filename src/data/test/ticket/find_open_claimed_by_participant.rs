use super::*;

/// Tests resolving a counterparty back to their claimed ticket.
///
/// Expected: Ok(Some) for the claimed open ticket
#[tokio::test]
async fn finds_claimed_ticket_for_counterparty() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .channel_id("600")
        .user1("1")
        .user2(Some("2"))
        .claimed_by(Some("9"))
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let ticket = repo.find_open_claimed_by_participant(2).await?;

    assert_eq!(ticket.map(|t| t.channel_id), Some(600));

    Ok(())
}

/// Tests that unclaimed and closed tickets are ignored.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_unclaimed_and_closed_tickets() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .user1("1")
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db)
        .user1("1")
        .claimed_by(Some("9"))
        .closed()
        .build()
        .await?;

    let repo = TicketRepository::new(db);

    assert!(repo.find_open_claimed_by_participant(1).await?.is_none());

    Ok(())
}

/// Tests resolving a vouch from a middleman's personal channel.
///
/// Expected: only the ticket claimed by that middleman matches
#[tokio::test]
async fn matches_assignee_and_participant() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db)
        .channel_id("700")
        .user1("1")
        .claimed_by(Some("8"))
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db)
        .channel_id("701")
        .user1("1")
        .claimed_by(Some("9"))
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let ticket = repo.find_open_for_assignee_and_participant(9, 1).await?;

    assert_eq!(ticket.map(|t| t.channel_id), Some(701));

    Ok(())
}
