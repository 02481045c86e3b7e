/// Canned Studio payloads in their snake_case wire form
use serde_json::{json, Value};

pub const COURSE: &str = "course-v1:OpenedX+DemoX+2025";
pub const LIBRARY: &str = "lib:OpenedX:CSPROB";
pub const TASK_UUID: &str = "3b1a4c9e-0000-4d8e-9a3b-5c2f0e1d7a11";

pub fn advanced_settings() -> Value {
    json!({
        "advanced_modules": {
            "value": ["poll", "survey"],
            "display_name": "Advanced Module List",
            "help": "Enter the names of the advanced modules to use in your course.",
            "deprecated": false,
            "hide_on_enabled_publisher": false
        },
        "days_early_for_beta": {
            "value": null,
            "display_name": "Days Early for Beta Users",
            "help": "Enter the number of days before the start date that beta users can access the course.",
            "deprecated": false,
            "hide_on_enabled_publisher": false
        },
        "discussion_topics": {
            "value": { "General": { "id": "course" } },
            "display_name": "Discussion Topic Mapping",
            "help": "Enter discussion categories.",
            "deprecated": false,
            "hide_on_enabled_publisher": false
        },
        "giturl": {
            "value": "",
            "display_name": "GIT URL",
            "help": "Enter the URL for the course's git repository.",
            "deprecated": true,
            "hide_on_enabled_publisher": false
        }
    })
}

pub fn task(uuid: &str, state: &str, is_failed: bool) -> Value {
    json!({
        "uuid": uuid,
        "state": state,
        "state_text": state,
        "completed_steps": if state == "Pending" { 0 } else { 4 },
        "total_steps": 4,
        "attempts": 1,
        "created": "2026-10-01T12:00:00Z",
        "modified": "2026-10-01T12:01:30Z",
        "artifacts": [],
        "parameters": [{
            "id": 7,
            "source": COURSE,
            "target": LIBRARY,
            "is_failed": is_failed,
            "target_collection": { "key": "demox-2025", "title": "Demonstration Course" },
            "composition_level": "section",
            "repeat_handling_strategy": "fork",
            "migration_summary": {
                "total_blocks": 14,
                "sections": 1,
                "subsections": 2,
                "units": 3,
                "components": 8,
                "unsupported": 0
            },
            "unsupported_reasons": []
        }]
    })
}

pub fn course_details() -> Value {
    json!({ "course_id": COURSE, "title": "Demonstration Course", "name": "DemoX" })
}

/// Block facets of the demo course: one problem-builder holding one html block
pub fn course_facets() -> Value {
    json!({
        "chapter": 1,
        "sequential": 2,
        "vertical": 3,
        "problem-builder": 1,
        "html": 1,
        "problem": 2
    })
}

pub fn child_facets() -> Value {
    json!({ "html": 1 })
}
