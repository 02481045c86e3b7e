use super::application::{
    GetImportStatus, GetImportStatusHandler, ImportDetailsView, StartCourseImport,
    StartCourseImportHandler,
};
use crate::commands::{AppState, CommandOutput};
use crate::modules::course_analysis::commands::review_import;
use crate::shared::application::use_case::{Query, UseCase};
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;
use clap::Subcommand;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Subcommand)]
pub enum ImportCommand {
    /// Import a course into a content library
    Start {
        /// Course key, e.g. course-v1:OpenedX+DemoX+2025
        #[arg(long)]
        course: String,
        /// Library key, e.g. lib:OpenedX:CSPROB
        #[arg(long)]
        library: String,
        /// Follow the import until it finishes
        #[arg(long)]
        watch: bool,
    },
    /// Show the reconciled status of a migration task
    Status { uuid: String },
    /// Poll a migration task until it finishes
    Watch { uuid: String },
    /// Import a course again after a failed attempt
    Retry {
        #[arg(long)]
        course: String,
        #[arg(long)]
        library: String,
    },
    /// Review what an import of a course would bring in
    Review {
        #[arg(long)]
        course: String,
        #[arg(long)]
        library: String,
    },
}

pub async fn run(
    command: ImportCommand,
    state: &AppState,
    cancel: &CancellationToken,
) -> AppResult<CommandOutput> {
    match command {
        ImportCommand::Start {
            course,
            library,
            watch,
        } => {
            let task = StartCourseImportHandler::new(state.migration_service.clone())
                .execute(StartCourseImport {
                    course_id: course,
                    library_id: library,
                    retry: false,
                })
                .await?;
            if watch {
                return watch_import(&task.uuid, state, cancel).await;
            }
            Ok(CommandOutput::new(
                &task,
                format!("Import started: task {}", task.uuid),
            ))
        }
        ImportCommand::Status { uuid } => {
            let view = GetImportStatusHandler::new(state.migration_service.clone())
                .execute(GetImportStatus { task_uuid: uuid })
                .await?;
            Ok(details_output(&view))
        }
        ImportCommand::Watch { uuid } => {
            Validator::validate_task_uuid(&uuid)?;
            watch_import(&uuid, state, cancel).await
        }
        ImportCommand::Retry { course, library } => {
            let task = StartCourseImportHandler::new(state.migration_service.clone())
                .execute(StartCourseImport {
                    course_id: course,
                    library_id: library,
                    retry: true,
                })
                .await?;
            Ok(CommandOutput::new(
                &task,
                format!("Import restarted: task {}", task.uuid),
            ))
        }
        ImportCommand::Review { course, library } => {
            review_import(&course, &library, state).await
        }
    }
}

async fn watch_import(
    uuid: &str,
    state: &AppState,
    cancel: &CancellationToken,
) -> AppResult<CommandOutput> {
    let view = state
        .migration_service
        .watch_import(uuid, cancel, |task| {
            eprintln!(
                "{}: {} ({}/{})",
                task.uuid, task.state, task.completed_steps, task.total_steps
            )
        })
        .await?;
    Ok(details_output(&view))
}

fn details_output(view: &ImportDetailsView) -> CommandOutput {
    let mut text = format!("{} [{}]", view.headline(), view.status);
    if let Some(link) = &view.content_link {
        text.push_str(&format!("\nView imported content: {}", link));
    }
    for reason in &view.unsupported_reasons {
        text.push_str(&format!(
            "\n  {} ({}): {}",
            reason.block_name, reason.block_type, reason.reason
        ));
    }
    if view.can_retry {
        text.push_str("\nRun `import retry` to try again.");
    }
    CommandOutput::new(view, text)
}
