//! Weekly middleman quota.
//!
//! Counts are keyed by ISO week. Both writers are single statements: a
//! completion increments a row whose week is current (restarting a stale one),
//! and the daily rollover only zeroes rows whose week is not, so a completion
//! recorded while the sweep runs is never lost.

use sea_orm::{ConnectionTrait, DatabaseConnection};
use serenity::all::{CreateEmbed, CreateEmbedFooter, Timestamp};

use crate::{
    config::Config,
    data::weekly_quota::WeeklyQuotaRepository,
    error::AppError,
    model::{leaderboard::BoardKind, quota::QuotaRecord},
    service::{
        leaderboard::{
            render::{BOARD_COLOR, QUOTA_BOARD_TITLE},
            LeaderboardService, UpsertOutcome,
        },
        platform::ChatPlatform,
    },
    util::week::current_week,
};

/// A middleman's progress towards this week's goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaProgress {
    pub user_id: u64,
    pub completed: i32,
}

/// Progress of every middleman, highest first.
///
/// Members without a record, or whose record is from another week, count 0.
/// Ties keep the order of `members`.
pub fn rank_progress(members: &[u64], records: &[QuotaRecord], week: i32) -> Vec<QuotaProgress> {
    let mut progress: Vec<QuotaProgress> = members
        .iter()
        .map(|user_id| QuotaProgress {
            user_id: *user_id,
            completed: records
                .iter()
                .find(|record| record.user_id == *user_id)
                .map(|record| record.completed_in(week))
                .unwrap_or(0),
        })
        .collect();

    progress.sort_by(|a, b| b.completed.cmp(&a.completed));
    progress
}

/// Board text with a completed section and an incomplete section.
///
/// Ranks continue from the completed section into the incomplete one.
pub fn render_board(progress: &[QuotaProgress], goal: i32, week: i32) -> String {
    let (done, pending): (Vec<&QuotaProgress>, Vec<&QuotaProgress>) =
        progress.iter().partition(|mm| mm.completed >= goal);

    let done_text = if done.is_empty() {
        "*No middlemen have met their quota yet.*".to_string()
    } else {
        done.iter()
            .enumerate()
            .map(|(i, mm)| format!("**#{}** <@{}> — **{} tickets**", i + 1, mm.user_id, mm.completed))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let pending_text = if pending.is_empty() {
        "*Everyone has met the quota!*".to_string()
    } else {
        pending
            .iter()
            .enumerate()
            .map(|(i, mm)| {
                format!(
                    "**#{}** <@{}> — **{} / {}**",
                    i + 1 + done.len(),
                    mm.user_id,
                    mm.completed,
                    goal
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "**Weekly Goal:** {} trades per middleman\n**Current Week:** {}\n\n__**Completed Quota:**__\n{}\n\n__**Incomplete Quota:**__\n{}",
        goal, week, done_text, pending_text
    )
}

pub fn board_embed(progress: &[QuotaProgress], goal: i32, week: i32) -> CreateEmbed {
    CreateEmbed::new()
        .title(QUOTA_BOARD_TITLE)
        .description(render_board(progress, goal, week))
        .color(BOARD_COLOR)
        .footer(CreateEmbedFooter::new(
            "Weekly middleman progress — auto resets every Monday",
        ))
        .timestamp(Timestamp::now())
}

pub struct QuotaService<'a> {
    db: &'a DatabaseConnection,
    platform: &'a dyn ChatPlatform,
    config: &'a Config,
}

impl<'a> QuotaService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        platform: &'a dyn ChatPlatform,
        config: &'a Config,
    ) -> Self {
        Self {
            db,
            platform,
            config,
        }
    }

    /// Renders this week's board for every member of the middleman role.
    pub async fn board(&self) -> Result<CreateEmbed, AppError> {
        let week = current_week();
        let members = self
            .platform
            .role_members(self.config.middleman_role_id)
            .await?;
        let records = WeeklyQuotaRepository::new(self.db).get_all().await?;

        let progress = rank_progress(&members, &records, week);

        Ok(board_embed(&progress, self.config.weekly_quota, week))
    }

    /// Keeps the quota channel's board current without duplicating it.
    ///
    /// # Returns
    /// - `Ok(Some(outcome))` - Board edited or sent
    /// - `Ok(None)` - No quota channel configured
    pub async fn post_board(&self) -> Result<Option<UpsertOutcome>, AppError> {
        let Some(channel_id) = self.config.quota_channel_id else {
            return Ok(None);
        };

        let embed = self.board().await?;
        let outcome = LeaderboardService::new(self.db, self.platform, self.config)
            .upsert_board(BoardKind::Quota, channel_id, None, embed)
            .await?;

        Ok(Some(outcome))
    }
}

/// Records a completed ticket for `assignee_id` in the current week.
pub async fn record_completion<C: ConnectionTrait>(
    db: &C,
    assignee_id: u64,
) -> Result<(), AppError> {
    WeeklyQuotaRepository::new(db)
        .record_completion(assignee_id, current_week())
        .await?;

    Ok(())
}

/// Zeroes every record left over from a previous week.
///
/// # Returns
/// - `Ok(u64)` - Number of records rolled over
pub async fn rollover_check(db: &DatabaseConnection) -> Result<u64, AppError> {
    let week = current_week();
    let rolled = WeeklyQuotaRepository::new(db).rollover(week).await?;

    tracing::info!("Quota rollover for week {}: {} records reset", week, rolled);

    Ok(rolled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user_id: u64, completed: i32, week: i32) -> QuotaRecord {
        QuotaRecord {
            user_id,
            completed,
            week,
        }
    }

    #[test]
    fn stale_records_count_as_zero() {
        let progress = rank_progress(&[1, 2], &[record(1, 7, 9), record(2, 2, 10)], 10);

        assert_eq!(
            progress,
            vec![
                QuotaProgress {
                    user_id: 2,
                    completed: 2
                },
                QuotaProgress {
                    user_id: 1,
                    completed: 0
                },
            ]
        );
    }

    #[test]
    fn ranks_continue_into_incomplete_section() {
        let progress = rank_progress(&[1, 2, 3], &[record(1, 5, 10), record(3, 1, 10)], 10);

        let text = render_board(&progress, 5, 10);

        assert!(text.contains("**#1** <@1> — **5 tickets**"));
        assert!(text.contains("**#2** <@3> — **1 / 5**"));
        assert!(text.contains("**#3** <@2> — **0 / 5**"));
    }

    #[test]
    fn empty_sections_use_placeholders() {
        let text = render_board(&[], 5, 10);

        assert!(text.contains("*No middlemen have met their quota yet.*"));
        assert!(text.contains("*Everyone has met the quota!*"));
    }
}
