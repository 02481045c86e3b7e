use crate::modules::migration::domain::{MigrationRepository, MigrationTask};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;
use crate::{log_debug, log_warn};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Polls a migration task until it reaches a terminal state
///
/// Stops on a terminal state, when `timeout` elapses, or when the token is
/// cancelled. Connection failures and rate limiting keep the poll going;
/// any other error ends it.
pub struct MigrationStatusPoller {
    migration_repo: Arc<dyn MigrationRepository>,
    interval: Duration,
    timeout: Duration,
}

impl MigrationStatusPoller {
    pub fn new(migration_repo: Arc<dyn MigrationRepository>, interval: Duration, timeout: Duration) -> Self {
        Self {
            migration_repo,
            interval,
            timeout,
        }
    }

    /// Poll `uuid`, calling `on_update` each time the task's state or progress changes
    pub async fn watch<F>(
        &self,
        uuid: &str,
        cancel: &CancellationToken,
        mut on_update: F,
    ) -> AppResult<MigrationTask>
    where
        F: FnMut(&MigrationTask) + Send,
    {
        let started = Instant::now();
        let mut last_seen: Option<(String, u32)> = None;

        loop {
            if cancel.is_cancelled() {
                return Err(AppError::Cancelled(format!(
                    "Stopped watching migration {}",
                    uuid
                )));
            }

            match self.migration_repo.get_migration_task(uuid).await {
                Ok(task) => {
                    let seen = (task.state.to_string(), task.completed_steps);
                    if last_seen.as_ref() != Some(&seen) {
                        LogContext::migration_progress(
                            &task.uuid,
                            task.state.as_str(),
                            task.completed_steps,
                            task.total_steps,
                        );
                        on_update(&task);
                        last_seen = Some(seen);
                    }
                    if task.state.is_terminal() {
                        return Ok(task);
                    }
                }
                Err(e) if e.is_connection_error() || matches!(e, AppError::RateLimitError(_)) => {
                    log_warn!("Polling migration {} failed, will retry: {}", uuid, e);
                }
                Err(e) => return Err(e),
            }

            let elapsed = started.elapsed();
            if elapsed >= self.timeout {
                return Err(AppError::Timeout(format!(
                    "Migration {} did not finish within {}s",
                    uuid,
                    self.timeout.as_secs()
                )));
            }

            let wait = self.interval.min(self.timeout - elapsed);
            log_debug!("Next poll of migration {} in {:?}", uuid, wait);
            tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(AppError::Cancelled(format!(
                        "Stopped watching migration {}",
                        uuid
                    )));
                }
                _ = tokio::time::sleep(wait) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::migration::domain::repositories::MockMigrationRepository;
    use crate::modules::migration::domain::{MigrationParameter, TaskState};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn task(state: TaskState) -> MigrationTask {
        MigrationTask::new(
            "uuid-1",
            state,
            vec![MigrationParameter::new("course-v1:A+B+C", false)],
        )
    }

    fn poller(repo: MockMigrationRepository, timeout: Duration) -> MigrationStatusPoller {
        MigrationStatusPoller::new(Arc::new(repo), Duration::from_millis(5), timeout)
    }

    #[tokio::test]
    async fn test_polls_until_terminal() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut repo = MockMigrationRepository::new();
        repo.expect_get_migration_task().returning(move |_| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            Ok(match n {
                0 => task(TaskState::Pending),
                1 => task(TaskState::InProgress),
                _ => task(TaskState::Succeeded),
            })
        });

        let mut updates = Vec::new();
        let result = poller(repo, Duration::from_secs(5))
            .watch("uuid-1", &CancellationToken::new(), |t| {
                updates.push(t.state.clone())
            })
            .await
            .unwrap();

        assert_eq!(result.state, TaskState::Succeeded);
        assert_eq!(
            updates,
            vec![TaskState::Pending, TaskState::InProgress, TaskState::Succeeded]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_connection_errors_keep_polling() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut repo = MockMigrationRepository::new();
        repo.expect_get_migration_task().returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::ExternalServiceError("Request timeout".to_string()))
            } else {
                Ok(task(TaskState::Failed))
            }
        });

        let result = poller(repo, Duration::from_secs(5))
            .watch("uuid-1", &CancellationToken::new(), |_| {})
            .await
            .unwrap();
        assert_eq!(result.state, TaskState::Failed);
    }

    #[tokio::test]
    async fn test_other_errors_stop_polling() {
        let mut repo = MockMigrationRepository::new();
        repo.expect_get_migration_task()
            .times(1)
            .returning(|_| Err(AppError::NotFound("uuid-1".to_string())));

        let result = poller(repo, Duration::from_secs(5))
            .watch("uuid-1", &CancellationToken::new(), |_| {})
            .await;
        assert_eq!(result, Err(AppError::NotFound("uuid-1".to_string())));
    }

    #[tokio::test]
    async fn test_times_out() {
        let mut repo = MockMigrationRepository::new();
        repo.expect_get_migration_task()
            .returning(|_| Ok(task(TaskState::Pending)));

        let result = poller(repo, Duration::from_millis(20))
            .watch("uuid-1", &CancellationToken::new(), |_| {})
            .await;
        assert!(matches!(result, Err(AppError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_cancellation_stops_polling() {
        let mut repo = MockMigrationRepository::new();
        repo.expect_get_migration_task()
            .returning(|_| Ok(task(TaskState::InProgress)));

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let result = poller(repo, Duration::from_secs(60))
            .watch("uuid-1", &cancel, move |_| trigger.cancel())
            .await;
        assert!(matches!(result, Err(AppError::Cancelled(_))));
    }
}
