use super::*;

/// Tests closing an open ticket and reopening it.
///
/// Expected: closed_at set after close, cleared after reopen
#[tokio::test]
async fn closes_and_reopens_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ticket = factory::create_ticket(db).await?;
    let channel_id: u64 = ticket.channel_id.parse().unwrap();

    let repo = TicketRepository::new(db);

    assert!(repo.mark_closed(channel_id).await?);
    assert!(repo.find_by_channel_id(channel_id).await?.unwrap().is_closed());

    assert!(repo.reopen(channel_id).await?);
    assert!(!repo.find_by_channel_id(channel_id).await?.unwrap().is_closed());

    Ok(())
}

/// Tests that closing twice only transitions once.
///
/// Expected: second call returns Ok(false)
#[tokio::test]
async fn closing_closed_ticket_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ticket = factory::ticket::TicketFactory::new(db).closed().build().await?;
    let channel_id: u64 = ticket.channel_id.parse().unwrap();

    let repo = TicketRepository::new(db);

    assert!(!repo.mark_closed(channel_id).await?);

    Ok(())
}
