//! Periodic maintenance jobs.

use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::port_battle::PortBattleService, state::AppState};

/// Starts the maintenance scheduler
///
/// This scheduler runs every minute and:
/// - Marks scheduled port battles as completed once their duration has passed
/// - Prunes activity entries older than the retention window
pub async fn start_scheduler(state: AppState) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    // Schedule job to run every minute
    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let state = state.clone();

        Box::pin(async move {
            run_maintenance(&state).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(scheduler)
}

/// Runs one pass of every maintenance task, logging failures without stopping.
pub async fn run_maintenance(state: &AppState) {
    if let Err(e) = PortBattleService::new(&state.db)
        .complete_finished(state.port_battle_duration)
        .await
    {
        tracing::error!("Error completing finished port battles: {}", e);
    }

    let pruned = state
        .activity_logger
        .prune_older_than(Utc::now() - state.activity_retention)
        .await;
    if pruned > 0 {
        tracing::debug!("Pruned {} activity entries", pruned);
    }
}
