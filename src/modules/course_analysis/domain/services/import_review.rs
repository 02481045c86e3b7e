use super::super::entities::{CourseDetails, LibraryBlockLimits};
use super::block_type_aggregator::BlockSummary;
use crate::modules::migration::domain::{MigrationInfo, PreviousMigration};
use serde::Serialize;

/// Banner at the top of the "review import details" step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReviewBanner {
    Loading,
    #[serde(rename_all = "camelCase")]
    AnalysisInProgress { course_title: String },
    #[serde(rename_all = "camelCase")]
    ImportBlocked { limit: u64 },
    #[serde(rename_all = "camelCase")]
    ReimportWarning {
        course_title: String,
        library_title: String,
    },
    #[serde(rename_all = "camelCase")]
    SomeContentUnsupported { unsupported_percentage: String },
    #[serde(rename_all = "camelCase")]
    AllContentImportable { course_title: String },
}

impl ReviewBanner {
    pub fn message(&self) -> String {
        match self {
            Self::Loading => "Loading...".to_string(),
            Self::AnalysisInProgress { course_title } => format!(
                "Import Analysis in Progress: {} is being analyzed for review prior to import. For large courses, this may take some time.",
                course_title
            ),
            Self::ImportBlocked { limit } => format!(
                "Import Blocked: this import would exceed the Content Library limit of {} items.",
                limit
            ),
            Self::ReimportWarning {
                course_title,
                library_title,
            } => format!(
                "Import Analysis Completed: Reimport. {} has already been imported into {}. Importing it again creates new copies of its content.",
                course_title, library_title
            ),
            Self::SomeContentUnsupported {
                unsupported_percentage,
            } => format!(
                "Import Analysis Complete: {}% of content cannot be imported. For details see below.",
                unsupported_percentage
            ),
            Self::AllContentImportable { course_title } => format!(
                "Import Analysis Complete: all content from {} can be imported.",
                course_title
            ),
        }
    }
}

/// Everything the review step knows about one course and target library
///
/// Each input is `None` while it is still loading.
#[derive(Debug, Clone, Default)]
pub struct ReviewInputs {
    pub library_id: String,
    pub course: Option<CourseDetails>,
    pub summary: Option<BlockSummary>,
    pub migration_info: Option<MigrationInfo>,
    pub block_limits: Option<LibraryBlockLimits>,
}

/// Outcome of the review step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReview {
    pub course_id: Option<String>,
    pub library_id: String,
    pub banner: ReviewBanner,
    pub analysis_complete: bool,
    pub import_blocked: bool,
    pub summary: Option<BlockSummary>,
    pub previous_migration: Option<PreviousMigration>,
}

impl ImportReview {
    pub fn evaluate(inputs: ReviewInputs) -> Self {
        let previous_migration = match (&inputs.course, &inputs.migration_info) {
            (Some(course), Some(info)) => info.find(&course.course_id, &inputs.library_id).cloned(),
            _ => None,
        };

        let analysis_complete = inputs.summary.is_some() && inputs.migration_info.is_some();

        let import_blocked = match (&inputs.summary, &inputs.block_limits) {
            (Some(summary), Some(limits)) => {
                summary.total_components > limits.max_blocks_per_content_library
            }
            _ => false,
        };

        let banner = match &inputs.course {
            None => ReviewBanner::Loading,
            Some(course) if !analysis_complete => ReviewBanner::AnalysisInProgress {
                course_title: course.title.clone(),
            },
            Some(course) => {
                if import_blocked {
                    ReviewBanner::ImportBlocked {
                        limit: inputs
                            .block_limits
                            .map(|l| l.max_blocks_per_content_library)
                            .unwrap_or_default(),
                    }
                } else if let Some(previous) = &previous_migration {
                    ReviewBanner::ReimportWarning {
                        course_title: course.title.clone(),
                        library_title: previous.target_title.clone(),
                    }
                } else {
                    match &inputs.summary {
                        Some(summary) if summary.unsupported_percentage > 0.0 => {
                            ReviewBanner::SomeContentUnsupported {
                                unsupported_percentage: summary.percentage_display(),
                            }
                        }
                        _ => ReviewBanner::AllContentImportable {
                            course_title: course.title.clone(),
                        },
                    }
                }
            }
        };

        Self {
            course_id: inputs.course.map(|c| c.course_id),
            library_id: inputs.library_id,
            banner,
            analysis_complete,
            import_blocked,
            summary: inputs.summary,
            previous_migration,
        }
    }
}
