use super::domain::entities::pretty_json;
use super::domain::{SaveOutcome, SettingEdits, SettingsValidation};
use crate::commands::{AppState, CommandOutput};
use crate::shared::errors::AppResult;
use clap::Subcommand;

#[derive(Debug, Clone, Subcommand)]
pub enum SettingsCommand {
    /// List the advanced settings of a course
    Show {
        #[arg(long)]
        course: String,
        /// Include deprecated settings
        #[arg(long)]
        show_deprecated: bool,
    },
    /// Check edits without sending them
    Validate {
        /// Edit as name=value, where value is the setting's JSON text
        #[arg(long = "set", value_parser = parse_edit, required = true)]
        edits: Vec<(String, String)>,
    },
    /// Validate edits and save them when they are all valid
    Save {
        #[arg(long)]
        course: String,
        #[arg(long = "set", value_parser = parse_edit, required = true)]
        edits: Vec<(String, String)>,
    },
}

fn parse_edit(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}

pub async fn run(command: SettingsCommand, state: &AppState) -> AppResult<CommandOutput> {
    let service = &state.settings_service;
    match command {
        SettingsCommand::Show {
            course,
            show_deprecated,
        } => {
            let settings = service.get_settings(&course).await?;
            let text = settings
                .visible(show_deprecated)
                .map(|(name, setting)| {
                    let marker = if setting.deprecated { " (deprecated)" } else { "" };
                    format!(
                        "{} [{}]{}\n{}",
                        setting.display_name,
                        name,
                        marker,
                        setting.editable_text()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n");
            Ok(CommandOutput::new(&settings, text))
        }
        SettingsCommand::Validate { edits } => {
            let validation = service.validate(&edits.into_iter().collect::<SettingEdits>())?;
            Ok(validation_output(&validation))
        }
        SettingsCommand::Save { course, edits } => {
            let outcome = service
                .save(&course, &edits.into_iter().collect::<SettingEdits>())
                .await?;
            match &outcome {
                SaveOutcome::Invalid { validation } => {
                    let mut output = validation_output(validation);
                    output.value = serde_json::to_value(&outcome).unwrap_or(output.value);
                    output.text.push_str("\nNothing was saved.");
                    Ok(output)
                }
                SaveOutcome::Saved { settings } => Ok(CommandOutput::new(
                    &outcome,
                    format!("Saved; the course now has {} settings.", settings.len()),
                )),
            }
        }
    }
}

fn validation_output(validation: &SettingsValidation) -> CommandOutput {
    if validation.is_valid {
        return CommandOutput::new(validation, "All edits are valid JSON.");
    }

    let mut text = String::from("Validation error while saving:");
    for error in &validation.errors {
        let repaired = validation
            .edited_settings
            .get(&error.key)
            .map(|value| match serde_json::from_str(value) {
                Ok(parsed) => pretty_json(&parsed),
                Err(_) => value.clone(),
            })
            .unwrap_or_default();
        text.push_str(&format!("\n  {}: {}\n    {}", error.key, error.message, repaired));
    }
    CommandOutput::new(validation, text)
}
