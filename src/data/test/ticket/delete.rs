use super::*;

/// Tests deleting an existing ticket record.
///
/// Expected: Ok(true) and the record is gone
#[tokio::test]
async fn deletes_existing_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ticket = factory::create_ticket(db).await?;
    let channel_id: u64 = ticket.channel_id.parse().unwrap();

    let repo = TicketRepository::new(db);

    assert!(repo.delete(channel_id).await?);
    assert!(repo.find_by_channel_id(channel_id).await?.is_none());

    Ok(())
}

/// Tests deleting a record that does not exist.
///
/// Expected: Ok(false), no error
#[tokio::test]
async fn deleting_missing_ticket_is_not_an_error() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);

    assert!(!repo.delete(12345).await?);

    Ok(())
}
