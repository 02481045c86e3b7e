use super::super::entities::MigrationTask;
use super::super::value_objects::{ImportStatus, TaskState};

/// Maps a backend task onto the status shown for a course import
///
/// A bulk task can succeed while the course inside it failed, so a succeeded
/// task is only a success when its first parameter did not fail.
pub struct MigrationStatusReconciler;

impl MigrationStatusReconciler {
    pub fn reconcile(task: &MigrationTask) -> ImportStatus {
        match task.state {
            TaskState::Failed => ImportStatus::Failed,
            TaskState::Succeeded => match task.course_parameter() {
                Some(parameter) if parameter.is_failed => ImportStatus::Failed,
                _ => ImportStatus::Succeeded,
            },
            _ => ImportStatus::InProgress,
        }
    }

    /// Succeeded, but some blocks were left behind as unsupported
    pub fn is_partial(task: &MigrationTask) -> bool {
        Self::reconcile(task) == ImportStatus::Succeeded
            && task
                .course_parameter()
                .and_then(|p| p.migration_summary.as_ref())
                .map(|summary| summary.unsupported > 0)
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::migration::domain::entities::{MigrationParameter, MigrationSummary};

    fn task(state: TaskState, is_failed: Option<bool>) -> MigrationTask {
        let parameters = is_failed
            .map(|failed| vec![MigrationParameter::new("course-v1:A+B+C", failed)])
            .unwrap_or_default();
        MigrationTask::new("uuid-1", state, parameters)
    }

    #[test]
    fn test_failed_task_is_failed() {
        assert_eq!(MigrationStatusReconciler::reconcile(&task(TaskState::Failed, Some(false))), ImportStatus::Failed);
        assert_eq!(MigrationStatusReconciler::reconcile(&task(TaskState::Failed, Some(true))), ImportStatus::Failed);
        assert_eq!(MigrationStatusReconciler::reconcile(&task(TaskState::Failed, None)), ImportStatus::Failed);
    }

    #[test]
    fn test_succeeded_task_follows_first_parameter() {
        assert_eq!(
            MigrationStatusReconciler::reconcile(&task(TaskState::Succeeded, Some(true))),
            ImportStatus::Failed
        );
        assert_eq!(
            MigrationStatusReconciler::reconcile(&task(TaskState::Succeeded, Some(false))),
            ImportStatus::Succeeded
        );
        assert_eq!(
            MigrationStatusReconciler::reconcile(&task(TaskState::Succeeded, None)),
            ImportStatus::Succeeded
        );
    }

    #[test]
    fn test_only_first_parameter_counts() {
        let mut t = task(TaskState::Succeeded, Some(false));
        t.parameters.push(MigrationParameter::new("course-v1:X+Y+Z", true));
        assert_eq!(MigrationStatusReconciler::reconcile(&t), ImportStatus::Succeeded);
    }

    #[test]
    fn test_other_states_are_in_progress() {
        for state in [
            TaskState::Pending,
            TaskState::InProgress,
            TaskState::Canceled,
            TaskState::Other("Retrying".to_string()),
        ] {
            assert_eq!(
                MigrationStatusReconciler::reconcile(&task(state, Some(true))),
                ImportStatus::InProgress
            );
        }
    }

    #[test]
    fn test_partial_import() {
        let mut t = task(TaskState::Succeeded, Some(false));
        assert!(!MigrationStatusReconciler::is_partial(&t));

        t.parameters[0].migration_summary = Some(MigrationSummary {
            total_blocks: 10,
            unsupported: 2,
            ..Default::default()
        });
        assert!(MigrationStatusReconciler::is_partial(&t));

        t.parameters[0].is_failed = true;
        assert!(!MigrationStatusReconciler::is_partial(&t));
    }
}
