use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, service::quota};

/// Daily at midnight UTC.
const ROLLOVER_SCHEDULE: &str = "0 0 0 * * *";

/// Starts the weekly quota rollover scheduler
///
/// Once a day every quota record whose week is not the current ISO week is
/// zeroed. Completions recorded in the current week are never touched.
///
/// # Arguments
/// - `db`: Database connection
pub async fn start_scheduler(db: DatabaseConnection) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(ROLLOVER_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            if let Err(e) = quota::rollover_check(&db).await {
                tracing::error!("Error rolling over weekly quotas: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Quota rollover scheduler started");

    Ok(scheduler)
}
