use crate::commands::{AppState, CommandOutput};
use crate::shared::errors::AppResult;

/// Banner and block summary for importing `course_id` into `library_id`
pub async fn review_import(
    course_id: &str,
    library_id: &str,
    state: &AppState,
) -> AppResult<CommandOutput> {
    let review = state
        .analysis_service
        .review_import(course_id, library_id)
        .await?;

    let mut text = review.banner.message();
    if let Some(summary) = &review.summary {
        text.push_str(&format!(
            "\nSections: {}  Subsections: {}  Units: {}\nBlocks: {}  Components: {}  Unsupported: {}%",
            summary.sections,
            summary.subsections,
            summary.units,
            summary.blocks_display(),
            summary.components_display(),
            summary.percentage_display(),
        ));
    }
    if review.import_blocked {
        text.push_str("\nThe import cannot be started.");
    }
    Ok(CommandOutput::new(&review, text))
}
