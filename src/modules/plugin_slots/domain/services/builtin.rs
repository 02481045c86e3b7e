use super::super::entities::{SlotName, Widget, WidgetCatalog};
use std::collections::BTreeMap;

/// Slots the authoring UI exposes
pub const SLOT_NAMES: &[&str] = &[
    "header_plugin_slot",
    "footer_plugin_slot",
    "sub_header_plugin_slot",
    "course_sidebar_plugin_slot",
    "card_header_menu_icon_plugin_slot",
    "drag_indicator_icon_plugin_slot",
    "schedule_and_details_plugin_slot",
    "schedule_and_details_icon_plugin_slot",
    "course_highlight_emails_toggle_plugin_slot",
    "statusbar_content_plugin_slot",
    "view_live_button_slot",
    "grading_header_plugin_slot",
    "grading_header_styleplugin_slot",
];

/// Widgets deployments may place into slots
pub fn builtin_catalog() -> WidgetCatalog {
    WidgetCatalog::new()
        .register("header_plugin_slot", "StudioHeader", "Site header")
        .register("footer-plugin", "StudioFooter", "Site footer")
        .register("sub_header_plugin_slot", "SubHeader", "Page title bar")
        .register("course-nav-bar", "CourseNavigationSidebar", "Course outline sidebar")
        .register("card-header-menu-icon", "MoreVertIcon", "Outline card menu icon")
        .register("drag-indicator-icon", "DragIndicatorIcon", "Outline drag handle")
        .register("custom-schedule-details", "ScheduleAndDetails", "Schedule & details page")
        .register("schedule-details-icon", "CalendarIcon", "Schedule & details icon")
        .register(
            "default-highlight-emails-toggle",
            "HighlightEmailsToggle",
            "Course highlight emails toggle",
        )
        .register("statusbar-content", "StatusBarContent", "Outline status bar")
        .register("statusbar-with-view-live", "ViewLiveButton", "View live button")
        .register("grading-content", "SubHeader", "Grading page header")
        .register("grading-content-style", "GradingSubHeader", "Styled grading page header")
}

/// Default widgets per slot before any configuration applies
///
/// Every slot renders its own contents at priority 50. The schedule icon slot
/// ships its icon as a named widget so that it can be replaced by id.
pub fn builtin_defaults() -> BTreeMap<SlotName, Vec<Widget>> {
    let mut defaults: BTreeMap<SlotName, Vec<Widget>> = SLOT_NAMES
        .iter()
        .map(|name| (SlotName::new(*name), vec![Widget::default_contents(50)]))
        .collect();

    defaults.insert(
        SlotName::new("schedule_and_details_icon_plugin_slot"),
        vec![Widget::direct("schedule-details-icon", "CalendarIcon", 50)],
    );

    defaults
}
