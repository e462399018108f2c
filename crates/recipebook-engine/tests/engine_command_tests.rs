// Command dispatch and the log events every command emits

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{alice, bob, named_submission, setup, test_submission};
use recipebook_core::errors::ExErrorKind;
use recipebook_core::logging_facility::init_test_capture;
use recipebook_core::Command;
use recipebook_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use recipebook_engine::commands::{apply_command, CommandResult};
use tracing::Level;

#[test]
fn test_apply_command_create_edit_delete() {
    let mut h = setup();
    let ctx = alice();

    let created = apply_command(
        Command::CreateRecipe {
            submission: test_submission(),
        },
        &mut h.conn,
        &h.images,
        &ctx,
    )
    .unwrap();
    let CommandResult::Saved(outcome) = created else {
        panic!("create should return Saved");
    };
    assert!(outcome.created);

    let edit = named_submission("Renamed", 15, "test");
    let edited = apply_command(
        Command::EditRecipe {
            recipe_id: outcome.recipe_id.clone(),
            submission: edit,
        },
        &mut h.conn,
        &h.images,
        &ctx,
    )
    .unwrap();
    let CommandResult::Saved(edited) = edited else {
        panic!("edit should return Saved");
    };
    assert!(!edited.created);
    assert_eq!(edited.details.recipe.name, "Renamed");
    assert_eq!(edited.details.tags.len(), 2);

    let deleted = apply_command(
        Command::DeleteRecipe {
            recipe_id: outcome.recipe_id.clone(),
        },
        &mut h.conn,
        &h.images,
        &ctx,
    )
    .unwrap();
    assert_eq!(
        deleted,
        CommandResult::Deleted {
            recipe_id: outcome.recipe_id
        }
    );
}

#[test]
fn test_create_logs_start_and_end_with_request_id() {
    let capture = init_test_capture();
    let mut h = setup();
    let ctx = alice();

    apply_command(
        Command::CreateRecipe {
            submission: test_submission(),
        },
        &mut h.conn,
        &h.images,
        &ctx,
    )
    .unwrap();

    let request_id = ctx.request_id.to_string();
    let events: Vec<_> = capture
        .events_for_op("recipe_create")
        .into_iter()
        .filter(|e| e.field("request_id") == Some(request_id.as_str()))
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[1].field("step_count"), Some("2"));
    assert!(events[1].field("duration_ms").is_some());
}

#[test]
fn test_forbidden_edit_logs_end_error() {
    let capture = init_test_capture();
    let mut h = setup();
    let CommandResult::Saved(outcome) = apply_command(
        Command::CreateRecipe {
            submission: test_submission(),
        },
        &mut h.conn,
        &h.images,
        &alice(),
    )
    .unwrap() else {
        panic!("create should return Saved");
    };

    let ctx = bob();
    let err = apply_command(
        Command::EditRecipe {
            recipe_id: outcome.recipe_id,
            submission: test_submission(),
        },
        &mut h.conn,
        &h.images,
        &ctx,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);

    let request_id = ctx.request_id.to_string();
    let failure = capture
        .events_for_op("recipe_edit")
        .into_iter()
        .find(|e| {
            e.event.as_deref() == Some(EVENT_END_ERROR)
                && e.field("request_id") == Some(request_id.as_str())
        })
        .expect("end_error event for bob's edit");
    assert_eq!(failure.level, Level::ERROR);
    assert_eq!(failure.field("err_code"), Some("ERR_FORBIDDEN"));
}

#[test]
fn test_validation_failure_logs_warning_with_categories() {
    let capture = init_test_capture();
    let mut h = setup();
    let ctx = alice();
    let mut submission = test_submission();
    submission.recipe.category = String::new();

    apply_command(
        Command::CreateRecipe { submission },
        &mut h.conn,
        &h.images,
        &ctx,
    )
    .unwrap_err();

    let request_id = ctx.request_id.to_string();
    let failure = capture
        .events_for_op("recipe_create")
        .into_iter()
        .find(|e| {
            e.event.as_deref() == Some(EVENT_END_ERROR)
                && e.field("request_id") == Some(request_id.as_str())
        })
        .expect("end_error event for the invalid create");
    assert_eq!(failure.level, Level::WARN);
    assert_eq!(failure.field("failed_categories"), Some("info"));
}
