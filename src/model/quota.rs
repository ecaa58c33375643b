use sea_orm::DbErr;

use crate::util::parse::parse_stored_id;

/// Tickets a middleman completed during one ISO week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaRecord {
    pub user_id: u64,
    pub completed: i32,
    /// ISO week number the count belongs to.
    pub week: i32,
}

impl QuotaRecord {
    pub fn from_entity(entity: entity::weekly_quota::Model) -> Result<Self, DbErr> {
        Ok(Self {
            user_id: parse_stored_id(&entity.user_id, "user_id")?,
            completed: entity.completed,
            week: entity.week,
        })
    }

    /// Count for `week`, treating records from other weeks as empty.
    pub fn completed_in(&self, week: i32) -> i32 {
        if self.week == week {
            self.completed
        } else {
            0
        }
    }
}
