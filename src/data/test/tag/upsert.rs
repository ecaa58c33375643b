use super::*;

/// Tests creating a tag and then overwriting its message.
///
/// Expected: latest message wins, single row
#[tokio::test]
async fn overwrites_existing_message() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Tag)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TagRepository::new(db);
    repo.upsert("rules", "Be nice").await?;
    repo.upsert("rules", "Be very nice").await?;

    let tag = repo.find_by_name("rules").await?.unwrap();
    assert_eq!(tag.message, "Be very nice");
    assert_eq!(repo.list_names().await?, vec!["rules".to_string()]);

    Ok(())
}

/// Tests deleting tags.
///
/// Expected: true for an existing tag, false for a missing one
#[tokio::test]
async fn deletes_by_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Tag)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_tag(db, "faq", "Read the FAQ").await?;

    let repo = TagRepository::new(db);

    assert!(repo.delete("faq").await?);
    assert!(!repo.delete("faq").await?);
    assert!(repo.find_by_name("faq").await?.is_none());

    Ok(())
}
