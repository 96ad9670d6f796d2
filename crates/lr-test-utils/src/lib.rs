//! Testing utilities for the LR creator workspace
//!
//! Shared form fixtures and session helpers.

#![allow(missing_docs)]

use lr_creator::form::{
    NAME_DESCRIPTION, NAME_DURATION, NAME_KIND, NAME_TASKS_ARRAY, NAME_TASK_DESCRIPTION,
    NAME_TASK_ENABLE_WORK_CHECK, NAME_TASK_TITLES, NAME_TASK_WORK_CHECK_HELP,
    NAME_TASK_WORK_CHECK_INSTRUCTIONS, NAME_TITLE, NAME_URL,
};
use lr_creator::{CategoryTags, CreatorConfig, CreatorSession, FormValues, ItemKind};
use serde_json::{json, Value};

pub fn quickstart_form(title: &str, duration: u32, task_titles: &[&str]) -> FormValues {
    FormValues::new()
        .with(NAME_KIND, ItemKind::Quickstart.as_str())
        .with(NAME_TITLE, title)
        .with(NAME_DESCRIPTION, format!("{title} description"))
        .with(NAME_DURATION, duration)
        .with(NAME_TASK_TITLES, json!(task_titles))
}

pub fn documentation_form(title: &str, url: &str) -> FormValues {
    link_form(ItemKind::Documentation, title, url)
}

pub fn link_form(kind: ItemKind, title: &str, url: &str) -> FormValues {
    FormValues::new()
        .with(NAME_KIND, kind.as_str())
        .with(NAME_TITLE, title)
        .with(NAME_DESCRIPTION, format!("{title} description"))
        .with(NAME_URL, url)
}

pub fn task_body(description: &str) -> Value {
    json!({ NAME_TASK_DESCRIPTION: description })
}

pub fn task_body_with_check(description: &str, instructions: &str, help: &str) -> Value {
    json!({
        NAME_TASK_DESCRIPTION: description,
        NAME_TASK_ENABLE_WORK_CHECK: true,
        NAME_TASK_WORK_CHECK_INSTRUCTIONS: instructions,
        NAME_TASK_WORK_CHECK_HELP: help,
    })
}

pub fn with_task_bodies(values: FormValues, bodies: Vec<Value>) -> FormValues {
    values.with(NAME_TASKS_ARRAY, Value::Array(bodies))
}

pub fn sample_tags() -> CategoryTags {
    let mut tags = CategoryTags::new().with_bundles(vec!["rhel".into(), "ansible".into()]);
    tags.toggle("use-case", "automation");
    tags.toggle("product-families", "rhel");
    tags
}

pub fn setup_test_session() -> CreatorSession {
    CreatorSession::new(CreatorConfig::new())
}

pub fn setup_session_with(values: FormValues) -> CreatorSession {
    let mut session = setup_test_session();
    session.set_values(values);
    session
}
