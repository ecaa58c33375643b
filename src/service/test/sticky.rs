use super::*;
use crate::service::sticky::StickyStore;

/// Tests that a sticky follows new messages.
///
/// Expected: old copy deleted, new copy sent and remembered
#[tokio::test]
async fn repost_moves_sticky_down() -> Result<(), AppError> {
    let platform = MockPlatform::new();
    let store = StickyStore::new();

    store.set(&platform, 20, "Read the rules first").await?;
    let first = store.message_id(20).await.unwrap();
    let moved = store.repost(&platform, 20).await?;
    let second = store.message_id(20).await.unwrap();

    assert!(moved);
    assert_ne!(first, second);
    assert_eq!(
        platform.state.lock().unwrap().deleted_messages,
        vec![(20, first)]
    );
    let sent = platform.sent_to(20);
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1]["content"], "Read the rules first");

    Ok(())
}

/// Tests a channel without a sticky.
///
/// Expected: nothing sent
#[tokio::test]
async fn repost_ignores_other_channels() -> Result<(), AppError> {
    let platform = MockPlatform::new();
    let store = StickyStore::new();

    let moved = store.repost(&platform, 21).await?;

    assert!(!moved);
    assert_eq!(platform.sent_count(), 0);

    Ok(())
}
