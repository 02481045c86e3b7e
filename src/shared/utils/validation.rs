use regex::Regex;
use std::sync::OnceLock;

use crate::shared::errors::AppError;

static COURSE_KEY: OnceLock<Regex> = OnceLock::new();
static LIBRARY_KEY: OnceLock<Regex> = OnceLock::new();

fn course_key_regex() -> &'static Regex {
    COURSE_KEY.get_or_init(|| {
        Regex::new(
            r"^(?:course-v1:[\w.\-~]+\+[\w.\-~]+\+[\w.\-~]+|ccx-v1:[\w.\-~]+\+[\w.\-~]+\+[\w.\-~]+\+ccx@\d+|[\w.\-~]+/[\w.\-~]+/[\w.\-~]+)$",
        )
        .expect("static regex")
    })
}

fn library_key_regex() -> &'static Regex {
    LIBRARY_KEY.get_or_init(|| Regex::new(r"^lib:[\w.\-~]+:[\w.\-~]+$").expect("static regex"))
}

pub struct Validator;

impl Validator {
    /// Course run keys look like `course-v1:Org+Number+Run`, or the legacy
    /// `Org/Number/Run`; CCX keys add `+ccx@N` under `ccx-v1:`
    pub fn validate_course_key(key: &str) -> Result<(), AppError> {
        if key.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Course key cannot be empty".to_string(),
            ));
        }
        if !course_key_regex().is_match(key) {
            return Err(AppError::ValidationError(format!(
                "'{}' is not a valid course key (expected course-v1:Org+Number+Run or Org/Number/Run)",
                key
            )));
        }
        Ok(())
    }

    /// Content library keys look like `lib:Org:slug`
    pub fn validate_library_key(key: &str) -> Result<(), AppError> {
        if key.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Library key cannot be empty".to_string(),
            ));
        }
        if !library_key_regex().is_match(key) {
            return Err(AppError::ValidationError(format!(
                "'{}' is not a valid library key (expected lib:Org:slug)",
                key
            )));
        }
        Ok(())
    }

    /// Migration tasks are identified by UUIDs
    pub fn validate_task_uuid(task_uuid: &str) -> Result<(), AppError> {
        uuid::Uuid::parse_str(task_uuid.trim())?;
        Ok(())
    }

    pub fn validate_setting_name(name: &str) -> Result<(), AppError> {
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Setting name cannot be empty".to_string(),
            ));
        }
        if name.len() > 255 {
            return Err(AppError::ValidationError(
                "Setting name too long (max 255 characters)".to_string(),
            ));
        }
        Ok(())
    }
}
