use super::application::ResolvedSlot;
use super::domain::{Widget, WidgetKind};
use crate::commands::{AppState, CommandOutput};
use crate::shared::errors::AppResult;
use clap::Subcommand;

#[derive(Debug, Clone, Subcommand)]
pub enum SlotsCommand {
    /// Show the widgets a slot renders, or every slot when none is named
    Resolve { slot: Option<String> },
    /// List the widgets configuration may use
    Catalog,
}

pub fn run(command: SlotsCommand, state: &AppState) -> AppResult<CommandOutput> {
    let service = &state.slot_service;
    match command {
        SlotsCommand::Resolve { slot: Some(slot) } => {
            let resolved = service.resolve(&slot)?;
            Ok(CommandOutput::new(&resolved, describe_slot(&resolved)))
        }
        SlotsCommand::Resolve { slot: None } => {
            let resolved = service.resolve_all();
            let text = resolved
                .iter()
                .map(describe_slot)
                .collect::<Vec<_>>()
                .join("\n");
            Ok(CommandOutput::new(&resolved, text))
        }
        SlotsCommand::Catalog => {
            let catalog = service.catalog();
            let text = catalog
                .iter()
                .map(|(id, entry)| format!("{:<36} {}", id, entry.description))
                .collect::<Vec<_>>()
                .join("\n");
            let value: std::collections::BTreeMap<_, _> = catalog.into_iter().collect();
            Ok(CommandOutput::new(&value, text))
        }
    }
}

fn describe_slot(resolved: &ResolvedSlot) -> String {
    let widgets = resolved
        .widgets
        .iter()
        .map(describe_widget)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}: {}", resolved.slot, widgets)
}

fn describe_widget(widget: &Widget) -> String {
    match &widget.kind {
        WidgetKind::DefaultContents => format!("{} ({})", widget.id, widget.priority),
        WidgetKind::DirectPlugin { component } => {
            format!("{} <{}> ({})", widget.id, component, widget.priority)
        }
        WidgetKind::IframePlugin { url, .. } => {
            format!("{} [{}] ({})", widget.id, url, widget.priority)
        }
    }
}
