use super::*;

/// Tests saving one address per currency and replacing it.
///
/// Expected: LTC replaced, ETH independent
#[tokio::test]
async fn keeps_one_address_per_currency() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::CryptoAddress)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CryptoAddressRepository::new(db);
    repo.save(9, Currency::Ltc, "ltc-old").await?;
    repo.save(9, Currency::Ltc, "ltc-new").await?;
    repo.save(9, Currency::Eth, "0xabc").await?;

    assert_eq!(repo.find(9, Currency::Ltc).await?.as_deref(), Some("ltc-new"));
    assert_eq!(repo.find(9, Currency::Eth).await?.as_deref(), Some("0xabc"));
    assert_eq!(repo.find(10, Currency::Eth).await?, None);

    Ok(())
}
