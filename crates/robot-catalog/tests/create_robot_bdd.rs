//! Behavioural tests for the create-robot submission flow.
//!
//! These scenarios drive the submission handler against an in-memory
//! catalogue and check the collection, selection and navigation outcomes.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;

use robot_catalog::{
    AvatarFactory, CountryLookup, Field, InMemoryRobotStore, RandomTokenSource,
    RecordingNavigator, Robot, RobotCollection, RobotDraft, Route, SubmissionError,
    SubmissionHandler,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

// ============================================================================
// Test fixtures and helpers
// ============================================================================

/// Test world holding the catalogue, navigator and the last submission.
#[derive(Default, ScenarioState)]
struct World {
    store: Slot<Arc<InMemoryRobotStore>>,
    navigator: Slot<Arc<RecordingNavigator>>,
    draft: Slot<RobotDraft>,
    result: Slot<Result<Robot, SubmissionError>>,
}

impl World {
    fn store(&self) -> Arc<InMemoryRobotStore> {
        self.store.get().expect("catalogue should be set")
    }

    fn navigator(&self) -> Arc<RecordingNavigator> {
        self.navigator.get().expect("navigator should be set")
    }

    fn draft(&self) -> RobotDraft {
        self.draft.get().expect("draft should be set")
    }

    fn result(&self) -> Result<Robot, SubmissionError> {
        self.result.get().expect("submission result should be set")
    }

    fn created(&self) -> Robot {
        self.result().expect("submission should succeed")
    }

    fn edit_draft(&self, field: Field, value: &str) {
        let mut draft = self.draft();
        draft.set(field, value);
        self.draft.set(draft);
    }

    fn submit(&self, draft: RobotDraft) {
        let mut handler = SubmissionHandler::new(
            CountryLookup::bundled().expect("bundled lookup"),
            AvatarFactory::default(),
            RandomTokenSource::seeded(2026),
            self.store(),
            self.navigator(),
        );
        self.result.set(handler.submit(draft));
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

fn draft_for(first_name: &str, last_name: &str) -> RobotDraft {
    RobotDraft {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        country: "France".to_owned(),
        description: "a pioneering programmer".to_owned(),
    }
}

fn field_named(name: &str) -> Field {
    Field::ALL
        .into_iter()
        .find(|field| field.key() == name)
        .unwrap_or_else(|| panic!("unknown field: {name}"))
}

// ============================================================================
// Given steps
// ============================================================================

#[given("an empty catalogue")]
fn an_empty_catalogue(world: &World) {
    world.store.set(Arc::new(InMemoryRobotStore::new()));
    world.navigator.set(Arc::new(RecordingNavigator::default()));
}

#[given("a valid draft for \"{first_name}\" \"{last_name}\"")]
fn a_valid_draft_for(world: &World, first_name: String, last_name: String) {
    world.draft.set(draft_for(&first_name, &last_name));
}

#[given("the email is \"{email}\"")]
fn the_email_is(world: &World, email: String) {
    world.edit_draft(Field::Email, &email);
}

#[given("the description is \"{description}\"")]
fn the_description_is(world: &World, description: String) {
    world.edit_draft(Field::Description, &description);
}

#[given("the country is left unselected")]
fn the_country_is_left_unselected(world: &World) {
    world.edit_draft(Field::Country, "");
}

// ============================================================================
// When steps
// ============================================================================

#[when("the draft is submitted")]
fn the_draft_is_submitted(world: &World) {
    world.submit(world.draft());
}

#[when("a valid draft for \"{first_name}\" \"{last_name}\" is submitted")]
fn a_valid_draft_is_submitted(world: &World, first_name: String, last_name: String) {
    world.submit(draft_for(&first_name, &last_name));
}

// ============================================================================
// Then steps
// ============================================================================

#[then("the submission succeeds")]
fn the_submission_succeeds(world: &World) {
    let result = world.result();
    assert!(result.is_ok(), "Expected submission to succeed: {result:?}");
}

#[then("the created robot has id {id:u64}")]
fn the_created_robot_has_id(world: &World, id: u64) {
    assert_eq!(world.created().id().get(), id);
}

#[then("the created robot is visible with a generated avatar")]
fn the_created_robot_is_visible_with_a_generated_avatar(world: &World) {
    let robot = world.created();
    assert!(robot.show());
    let token = robot
        .avatar()
        .as_str()
        .strip_prefix("https://robohash.org/")
        .expect("avatar should use the default service");
    assert!(!token.is_empty());
}

#[then("the catalogue holds {count:usize} robots")]
fn the_catalogue_holds_robots(world: &World, count: usize) {
    assert_eq!(world.store().current_list().len(), count);
}

#[then("the created robot is selected")]
fn the_created_robot_is_selected(world: &World) {
    assert_eq!(world.store().selected(), Some(world.created()));
}

#[then("the catalogue lists \"{newer}\" before \"{older}\"")]
fn the_catalogue_lists_before(world: &World, newer: String, older: String) {
    let names: Vec<String> = world
        .store()
        .current_list()
        .iter()
        .map(|robot| robot.first_name().to_owned())
        .collect();
    assert_eq!(names, [newer, older]);
}

#[then("the browse view is requested {count:usize} times")]
fn the_browse_view_is_requested(world: &World, count: usize) {
    let visited = world.navigator().visited();
    assert_eq!(visited.len(), count);
    assert!(visited.iter().all(|route| *route == Route::Browse));
}

#[then("the submission is rejected with \"{code}\" for \"{field}\"")]
fn the_submission_is_rejected_with(world: &World, code: String, field: String) {
    let err = world.result().expect_err("submission should be rejected");
    let report = err.report().expect("rejection should carry a report");
    let error = report
        .error(field_named(&field))
        .expect("field should be invalid");
    assert_eq!(error.kind.code(), code);
}

#[then("the rejection message for \"{field}\" is \"{message}\"")]
fn the_rejection_message_is(world: &World, field: String, message: String) {
    let err = world.result().expect_err("submission should be rejected");
    let report = err.report().expect("rejection should carry a report");
    assert_eq!(report.message(field_named(&field)), Some(message.as_str()));
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/create_robot.feature",
    name = "First valid submission creates robot one"
)]
fn first_valid_submission_creates_robot_one(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/create_robot.feature",
    name = "A second submission is prepended"
)]
fn a_second_submission_is_prepended(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/create_robot.feature",
    name = "An invalid email is rejected"
)]
fn an_invalid_email_is_rejected(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/create_robot.feature",
    name = "An unselected country is required"
)]
fn an_unselected_country_is_required(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/create_robot.feature",
    name = "A nine character description is too short"
)]
fn a_nine_character_description_is_too_short(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/create_robot.feature",
    name = "A ten character description is accepted"
)]
fn a_ten_character_description_is_accepted(world: World) {
    let _ = world;
}
