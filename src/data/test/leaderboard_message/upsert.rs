use super::*;

/// Tests remembering a board message and replacing it.
///
/// Expected: the second upsert replaces the message id of the same kind
#[tokio::test]
async fn replaces_message_for_kind() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LeaderboardMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LeaderboardMessageRepository::new(db);
    repo.upsert(BoardKind::Clients, 5, 100).await?;
    repo.upsert(BoardKind::Clients, 5, 200).await?;
    repo.upsert(BoardKind::Quota, 6, 300).await?;

    let clients = repo.get(BoardKind::Clients).await?.unwrap();
    assert_eq!(clients.channel_id, 5);
    assert_eq!(clients.message_id, 200);

    let quota = repo.get(BoardKind::Quota).await?.unwrap();
    assert_eq!(quota.message_id, 300);

    assert!(repo.get(BoardKind::Middlemen).await?.is_none());

    Ok(())
}

/// Tests two writers remembering the same board at once.
///
/// Expected: both succeed and one row remains for the kind
#[tokio::test]
async fn concurrent_upserts_keep_one_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::LeaderboardMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LeaderboardMessageRepository::new(db);
    let (first, second) = tokio::join!(
        repo.upsert(BoardKind::Clients, 5, 100),
        repo.upsert(BoardKind::Clients, 5, 200)
    );
    first?;
    second?;

    let rows = entity::prelude::LeaderboardMessage::find().all(db).await?;
    assert_eq!(rows.len(), 1);
    let remembered = repo.get(BoardKind::Clients).await?.unwrap();
    assert!([100, 200].contains(&remembered.message_id));

    Ok(())
}
