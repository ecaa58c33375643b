//! Ticket data repository.
//!
//! Tickets are keyed by the Discord channel hosting them. The claim update is
//! conditional on the ticket still being unclaimed so two middlemen pressing
//! *Claim* at once cannot both win.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::ticket::{CreateTicketParam, Ticket};

pub struct TicketRepository<'a, C: ConnectionTrait = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TicketRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Persists a freshly provisioned ticket.
    ///
    /// # Arguments
    /// - `param` - Channel, participants and trade details
    ///
    /// # Returns
    /// - `Ok(Ticket)` - Stored ticket
    /// - `Err(DbErr)` - Insert failed, including a duplicate channel id
    pub async fn create(&self, param: CreateTicketParam) -> Result<Ticket, DbErr> {
        let entity = entity::ticket::ActiveModel {
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            user1: ActiveValue::Set(param.user1.to_string()),
            user2: ActiveValue::Set(param.user2.map(|id| id.to_string())),
            claimed_by: ActiveValue::Set(None),
            trade: ActiveValue::Set(param.details.trade),
            side1: ActiveValue::Set(param.details.side1),
            side2: ActiveValue::Set(param.details.side2),
            closed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ticket::from_entity(entity)
    }

    /// Gets the ticket hosted in `channel_id`.
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))` - Ticket found
    /// - `Ok(None)` - Channel is not a ticket
    /// - `Err(DbErr)` - Database error or malformed stored id
    pub async fn find_by_channel_id(&self, channel_id: u64) -> Result<Option<Ticket>, DbErr> {
        entity::prelude::Ticket::find_by_id(channel_id.to_string())
            .one(self.db)
            .await?
            .map(Ticket::from_entity)
            .transpose()
    }

    /// Records `assignee_id` as the ticket's middleman if nobody claimed it yet.
    ///
    /// # Returns
    /// - `Ok(true)` - Claim recorded
    /// - `Ok(false)` - Ticket missing or already claimed; nothing changed
    /// - `Err(DbErr)` - Database error
    pub async fn claim(&self, channel_id: u64, assignee_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::Ticket::update_many()
            .col_expr(
                entity::ticket::Column::ClaimedBy,
                Expr::value(assignee_id.to_string()),
            )
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .filter(entity::ticket::Column::ClaimedBy.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Marks the ticket closed.
    ///
    /// # Returns
    /// - `Ok(true)` - Ticket was open and is now closed
    /// - `Ok(false)` - Ticket missing or already closed
    pub async fn mark_closed(&self, channel_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::Ticket::update_many()
            .col_expr(entity::ticket::Column::ClosedAt, Expr::value(Utc::now()))
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .filter(entity::ticket::Column::ClosedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Clears the closed marker so the ticket counts as open again.
    pub async fn reopen(&self, channel_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::Ticket::update_many()
            .col_expr(
                entity::ticket::Column::ClosedAt,
                Expr::value(Option::<chrono::DateTime<Utc>>::None),
            )
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Deletes the ticket record for `channel_id`.
    ///
    /// Missing records are not an error.
    ///
    /// # Returns
    /// - `Ok(true)` - A record was deleted
    /// - `Ok(false)` - No record existed
    pub async fn delete(&self, channel_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::Ticket::delete_by_id(channel_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Newest open, claimed ticket `user_id` participates in.
    ///
    /// Used to resolve a vouch posted outside the ticket channel back to its
    /// ticket.
    pub async fn find_open_claimed_by_participant(
        &self,
        user_id: u64,
    ) -> Result<Option<Ticket>, DbErr> {
        let id = user_id.to_string();

        entity::prelude::Ticket::find()
            .filter(
                Condition::any()
                    .add(entity::ticket::Column::User1.eq(id.clone()))
                    .add(entity::ticket::Column::User2.eq(id)),
            )
            .filter(entity::ticket::Column::ClaimedBy.is_not_null())
            .filter(entity::ticket::Column::ClosedAt.is_null())
            .order_by_desc(entity::ticket::Column::CreatedAt)
            .one(self.db)
            .await?
            .map(Ticket::from_entity)
            .transpose()
    }

    /// Newest open ticket claimed by `assignee_id` that `user_id` participates in.
    ///
    /// Used to resolve a vouch posted in a middleman's personal vouch channel.
    pub async fn find_open_for_assignee_and_participant(
        &self,
        assignee_id: u64,
        user_id: u64,
    ) -> Result<Option<Ticket>, DbErr> {
        let id = user_id.to_string();

        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ClaimedBy.eq(assignee_id.to_string()))
            .filter(
                Condition::any()
                    .add(entity::ticket::Column::User1.eq(id.clone()))
                    .add(entity::ticket::Column::User2.eq(id)),
            )
            .filter(entity::ticket::Column::ClosedAt.is_null())
            .order_by_desc(entity::ticket::Column::CreatedAt)
            .one(self.db)
            .await?
            .map(Ticket::from_entity)
            .transpose()
    }
}
