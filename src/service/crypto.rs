//! Saved payout addresses shown from the claim announcement.

use sea_orm::DatabaseConnection;
use serenity::all::CreateEmbed;

use crate::{
    config::Config,
    data::crypto_address::CryptoAddressRepository,
    error::AppError,
    model::crypto::Currency,
    service::EMBED_COLOR,
};

pub fn logo_url(currency: Currency) -> &'static str {
    match currency {
        Currency::Ltc => "https://cryptologos.cc/logos/litecoin-ltc-logo.png",
        Currency::Eth => "https://cryptologos.cc/logos/ethereum-eth-logo.png",
    }
}

pub fn address_embed(currency: Currency, address: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("__**• {} Address •**__", currency))
        .description(format!(
            "**Address:**\n`{}`\n\n**⚠️ Warning:** *Funds sent to the wrong address will be lost!*",
            address
        ))
        .color(EMBED_COLOR)
        .thumbnail(logo_url(currency))
}

pub struct CryptoService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> CryptoService<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    pub async fn save(&self, user_id: u64, currency: Currency, address: &str) -> Result<(), AppError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Usage: `{}save{} <address>`",
                self.config.command_prefix,
                currency.as_str().to_ascii_lowercase()
            )));
        }

        CryptoAddressRepository::new(self.db)
            .save(user_id, currency, address)
            .await?;

        tracing::info!("Saved {} address for {}", currency, user_id);

        Ok(())
    }

    /// Reveals the middleman's saved address to whoever pressed the button.
    ///
    /// # Arguments
    /// - `middleman_id` - Middleman the button was posted for
    /// - `viewer_id` - Who pressed it
    /// - `viewer_is_staff` - Whether they hold the staff role or administrator
    ///
    /// # Returns
    /// - `Ok(CreateEmbed)` - Address embed
    /// - `Err(AppError::PermissionDenied)` - Viewer is neither the middleman nor staff
    /// - `Err(AppError::NotFound)` - No address saved for that currency
    pub async fn reveal(
        &self,
        currency: Currency,
        middleman_id: u64,
        viewer_id: u64,
        viewer_is_staff: bool,
    ) -> Result<CreateEmbed, AppError> {
        if viewer_id != middleman_id && !viewer_is_staff {
            return Err(AppError::PermissionDenied(
                "You cannot use this button.".to_string(),
            ));
        }

        let address = CryptoAddressRepository::new(self.db)
            .find(middleman_id, currency)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "**No {} address saved for this middleman.**",
                    currency
                ))
            })?;

        Ok(address_embed(currency, &address))
    }
}
