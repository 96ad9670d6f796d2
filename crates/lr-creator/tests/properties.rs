use lr_creator::form::{NAME_KIND, NAME_TASKS_ARRAY, NAME_TASK_TITLES, NAME_TITLE};
use lr_creator::{
    generate_artifacts, meta_for_kind, project, slugify, stage_from_step_id,
    task_index_from_step_id, task_step_id, CategoryTags, CreatorConfig, FormValues, ItemKind,
    NavigationInput, StepGraph, WizardStage, ALL_ITEM_KINDS, MAX_TASKS,
};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashSet;

fn any_kind() -> impl Strategy<Value = ItemKind> {
    prop::sample::select(ALL_ITEM_KINDS.to_vec())
}

fn any_task_body() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        "[a-z ]{0,12}".prop_map(|d| json!({ "description": d })),
        "[a-z ]{0,12}".prop_map(|d| json!({ "description": d, "enable_work_check": true })),
        Just(json!("description: from text")),
        Just(json!("[unbalanced")),
        Just(json!(42)),
    ]
}

fn task_form(
    kind: ItemKind,
    titles: &[String],
    bodies: Vec<Value>,
) -> FormValues {
    FormValues::new()
        .with(NAME_KIND, kind.as_str())
        .with(NAME_TITLE, "Anything")
        .with(NAME_TASK_TITLES, json!(titles))
        .with(NAME_TASKS_ARRAY, Value::Array(bodies))
}

proptest! {
    #[test]
    fn prop_task_index_round_trips(index in 0..MAX_TASKS) {
        prop_assert_eq!(task_index_from_step_id(task_step_id(index).as_str()), Some(index));
        prop_assert_eq!(
            stage_from_step_id(task_step_id(index).as_str()),
            WizardStage::Task { index }
        );
    }

    #[test]
    fn prop_task_count_follows_titles(
        kind in any_kind(),
        titles in prop::collection::vec("[A-Za-z ]{0,10}", 0..=MAX_TASKS),
        bodies in prop::collection::vec(any_task_body(), 0..=MAX_TASKS + 2),
    ) {
        let record = project(Some(kind), &task_form(kind, &titles, bodies));
        if meta_for_kind(kind).has_tasks {
            let tasks = record.tasks().unwrap_or_default();
            prop_assert_eq!(tasks.len(), titles.len());
            for (task, title) in tasks.iter().zip(&titles) {
                prop_assert_eq!(&task.title, title);
            }
        } else {
            prop_assert!(record.tasks().is_none());
            prop_assert!(record.spec.introduction.is_none());
            prop_assert!(record.spec.prerequisites.is_none());
        }
    }

    #[test]
    fn prop_artifacts_are_idempotent(
        kind in any_kind(),
        title in "[A-Za-z !]{0,20}",
        bundles in prop::collection::vec("[a-z]{1,6}", 0..4),
    ) {
        let values = FormValues::new().with(NAME_KIND, kind.as_str()).with(NAME_TITLE, title);
        let record = project(Some(kind), &values);
        let tags = CategoryTags::new().with_bundles(bundles);
        let first = generate_artifacts(&record, &tags).unwrap();
        let second = generate_artifacts(&record, &tags).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_slug_has_no_whitespace_or_edge_hyphens(name in "[A-Za-z \\t-]{0,24}") {
        let slug = slugify(&name);
        prop_assert!(!slug.chars().any(char::is_whitespace));
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        if name.trim().is_empty() {
            prop_assert_eq!(slug, "");
        }
    }

    #[test]
    fn prop_path_length_matches_task_count(task_count in 1..=MAX_TASKS) {
        let graph = StepGraph::build(&CreatorConfig::new());
        let path = graph
            .path(&NavigationInput::new(Some(ItemKind::Quickstart), task_count))
            .unwrap();
        // kind, details, panel overview, tasks, download
        prop_assert_eq!(path.len(), 3 + task_count + 1);
    }
}

#[test]
fn every_graph_step_decodes_to_its_construction_stage() {
    let graph = StepGraph::build(&CreatorConfig::new());
    let task_kinds = ALL_ITEM_KINDS
        .iter()
        .filter(|kind| meta_for_kind(**kind).has_tasks)
        .count();
    assert_eq!(graph.len(), 1 + ALL_ITEM_KINDS.len() + task_kinds + MAX_TASKS + 1);

    let ids: HashSet<_> = graph.steps().iter().map(|step| step.id.clone()).collect();
    assert_eq!(ids.len(), graph.len());

    let steps = graph.steps();
    assert_eq!(stage_from_step_id(steps[0].id.as_str()), WizardStage::Card);
    for step in &steps[1..=ALL_ITEM_KINDS.len()] {
        assert_eq!(stage_from_step_id(step.id.as_str()), WizardStage::Card);
    }
    let panels = &steps[1 + ALL_ITEM_KINDS.len()..1 + ALL_ITEM_KINDS.len() + task_kinds];
    for step in panels {
        assert_eq!(stage_from_step_id(step.id.as_str()), WizardStage::PanelOverview);
    }
    let tasks = &steps[1 + ALL_ITEM_KINDS.len() + task_kinds..steps.len() - 1];
    for (index, step) in tasks.iter().enumerate() {
        assert_eq!(stage_from_step_id(step.id.as_str()), WizardStage::Task { index });
    }
    assert_eq!(
        stage_from_step_id(steps[steps.len() - 1].id.as_str()),
        WizardStage::Download
    );
}

#[test]
fn slug_example() {
    let slug = slugify("My  Great Quickstart!");
    assert_eq!(slug, "my-great-quickstart!");
    assert_eq!(slugify(" \t\n "), "");
}
