//! End-to-end authoring scenarios

use lr_creator::form::{NAME_KIND, NAME_PANEL_INTRODUCTION, NAME_PREREQUISITES, NAME_URL};
use lr_creator::prelude::*;
use lr_creator::{
    download_step_id, meta_for_kind, task_step_id, PreviewMode, TagColor, ALL_ITEM_KINDS,
    MAX_TASKS,
};
use lr_test_utils::{
    documentation_form, quickstart_form, sample_tags, setup_session_with, task_body,
    task_body_with_check, with_task_bodies,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Number};

#[test]
fn quickstart_then_switch_to_documentation() {
    let values = quickstart_form("Deploy App", 15, &["Setup", "Run"])
        .with(NAME_PANEL_INTRODUCTION, "Get started")
        .with(NAME_PREREQUISITES, json!(["A cluster"]));

    let record = project(Some(ItemKind::Quickstart), &values);
    let type_tag = record.spec.type_tag.clone().unwrap();
    assert_eq!(record.spec.duration_minutes, Some(Number::from(15)));
    assert_eq!(record.spec.link, None);
    assert_eq!(record.tasks().map(<[_]>::len), Some(2));
    assert_eq!(type_tag.text, "Quickstart");
    assert_eq!(type_tag.color, TagColor::Green);
    assert_eq!(record.spec.introduction.as_deref(), Some("Get started"));

    // Raw values keep their task data; the kind alone gates the projection.
    let switched = values.clone().with(NAME_KIND, "documentation");
    let record = project(switched.kind(), &switched);
    assert_eq!(record.spec.tasks, None);
    assert_eq!(record.spec.introduction, None);
    assert_eq!(record.spec.prerequisites, None);
    assert_eq!(record.spec.duration_minutes, None);
    assert_eq!(record.spec.link, None);
    assert!(record.metadata.extra.external_documentation);

    let with_url = switched.with(NAME_URL, "https://docs.example.com/deploy");
    let record = project(with_url.kind(), &with_url);
    let link = record.spec.link.unwrap();
    assert_eq!(link.href, "https://docs.example.com/deploy");
    assert_eq!(link.text, "View documentation");
}

#[test]
fn three_tasks_reach_download_only_after_last() {
    let config = CreatorConfig::new();
    let graph = StepGraph::build(&config);
    let input = NavigationInput::new(Some(ItemKind::Quickstart), 3);

    let next = |index| graph.next_step(&task_step_id(index), &input).unwrap();
    assert_eq!(next(0), Some(task_step_id(1)));
    assert_eq!(next(1), Some(task_step_id(2)));
    assert_eq!(next(2), Some(download_step_id()));
}

#[test]
fn full_session_walk_generates_files() {
    let values = with_task_bodies(
        quickstart_form("Deploy App", 15, &["Setup", "Run"]),
        vec![
            task_body("Install the operator"),
            task_body_with_check("Run the app", "Is it running?", "Check the logs"),
        ],
    );
    let mut session = setup_session_with(values);
    for tag in [("use-case", "automation"), ("product-families", "rhel")] {
        session.toggle_tag(tag.0, tag.1);
    }
    session.update_values(|v| v.set("bundles", json!(["rhel", "ansible"])));

    let mut stages = vec![session.current_stage()];
    while session.current_step() != &download_step_id() {
        session.advance().unwrap();
        stages.push(session.current_stage());
    }
    assert_eq!(
        stages,
        vec![
            WizardStage::Card,
            WizardStage::Card,
            WizardStage::PanelOverview,
            WizardStage::Task { index: 0 },
            WizardStage::Task { index: 1 },
            WizardStage::Download,
        ]
    );
    assert_eq!(session.preview(), PreviewMode::Card);

    let [index, body] = session.files().unwrap();
    let [expected_index, _] = generate_artifacts(&session.record(), &sample_tags()).unwrap();
    assert_eq!(index, expected_index);
    assert_eq!(body.name, "deploy-app.yaml");

    let parsed: NormalizedRecord = serde_yaml::from_str(&body.content).unwrap();
    let tasks = parsed.spec.tasks.unwrap();
    assert_eq!(tasks[0].review, None);
    let review = tasks[1].review.clone().unwrap();
    assert_eq!(review.instructions.as_deref(), Some("Is it running?"));
    assert_eq!(review.failed_task_help.as_deref(), Some("Check the logs"));
}

#[test]
fn documentation_walk_skips_panel() {
    let session_values = documentation_form("Read The Docs", "https://docs.example.com");
    let graph = StepGraph::build(&CreatorConfig::new());
    let path = graph
        .path(&NavigationInput::from_values(&session_values))
        .unwrap();
    let stages: Vec<_> = path.iter().map(|id| stage_from_step_id(id.as_str())).collect();
    assert_eq!(
        stages,
        vec![WizardStage::Card, WizardStage::Card, WizardStage::Download]
    );
}

#[test]
fn growing_tasks_mid_flow_extends_path() {
    let mut session = setup_session_with(quickstart_form("Deploy App", 5, &["One"]));
    for _ in 0..3 {
        session.advance().unwrap();
    }
    assert_eq!(session.current_stage(), WizardStage::Task { index: 0 });
    assert_eq!(session.next_label().unwrap().as_deref(), Some("Approve and generate files"));

    session.add_task("Two").unwrap();
    assert_eq!(session.next_label().unwrap().as_deref(), Some("Create task 2 content"));
    assert_eq!(session.advance().unwrap(), &task_step_id(1));
}

#[test]
fn every_task_kind_has_panel_and_tasks() {
    for kind in ALL_ITEM_KINDS {
        let meta = meta_for_kind(kind);
        let record = project(Some(kind), &quickstart_form("X", 1, &["a", "b", "c"]));
        assert_eq!(record.tasks().is_some(), meta.has_tasks, "{kind}");
    }
}

#[test]
fn session_rejects_tasks_beyond_max() {
    let titles: Vec<String> = (0..MAX_TASKS).map(|i| format!("Task {i}")).collect();
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    let mut session = setup_session_with(quickstart_form("Full", 1, &titles));
    assert!(session.add_task("Overflow").is_err());
    assert_eq!(session.record().tasks().map(<[_]>::len), Some(MAX_TASKS));
}
