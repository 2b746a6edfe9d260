use crate::steps::world::MarksWorld;
use crossterm::event::KeyCode;
use cucumber::{given, then, when};
use markline::ui::models::{EditField, Subject};
use serde_json::Value;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, ResponseTemplate};

#[given("the server accepts new students")]
async fn server_accepts_new_students(world: &mut MarksWorld) {
    Mock::given(method("POST"))
        .and(path("/students/add"))
        .respond_with(ResponseTemplate::new(200))
        .mount(world.server().await)
        .await;
}

#[given("the server accepts mark updates")]
async fn server_accepts_updates(world: &mut MarksWorld) {
    Mock::given(method("PUT"))
        .and(path_regex(r"^/students/[^/]+$"))
        .respond_with(ResponseTemplate::new(200))
        .mount(world.server().await)
        .await;
}

#[when(expr = "I add a student {string} with password {string} and English mark {int}")]
async fn add_student(world: &mut MarksWorld, name: String, password: String, english: i32) {
    let harness = world.harness();
    harness.type_text("a");
    harness.type_text(&name);
    harness.press(KeyCode::Tab);
    harness.type_text(&password);
    harness.press(KeyCode::Tab);
    harness.retype(1, &english.to_string());
    harness.press(KeyCode::Enter);
    harness.settle().await;
}

#[when(expr = "I change the Math mark of the selected student to {int}")]
async fn change_math_mark(world: &mut MarksWorld, mark: i32) {
    let harness = world.harness();
    harness.press(KeyCode::Char('e'));
    harness.run_keys();

    let math = Some(EditField::Mark(Subject::Math));
    for _ in 0..Subject::ALL.len() + 2 {
        if harness.app.state().edit.as_ref().map(|edit| edit.focus()) == math {
            break;
        }
        harness.press(KeyCode::Tab);
        harness.run_keys();
    }
    let old_len = harness
        .app
        .state()
        .edit
        .as_ref()
        .map_or(0, |edit| edit.field_text(EditField::Mark(Subject::Math)).len());
    harness.retype(old_len, &mark.to_string());
    harness.press(KeyCode::Enter);
    harness.settle().await;
}

#[when("I open the editor on the selected student")]
async fn open_editor(world: &mut MarksWorld) {
    let harness = world.harness();
    harness.press(KeyCode::Char('e'));
    harness.settle().await;
}

#[then("no student was added")]
async fn no_student_added(world: &mut MarksWorld) {
    assert!(world.requests("POST", "/students/add").await.is_empty());
}

#[then(expr = "the update sent a total of {int}")]
async fn update_total(world: &mut MarksWorld, total: i64) {
    let requests = world.requests("PUT", "/students/1").await;
    assert_eq!(requests.len(), 1);
    let body: Value = requests[0].body_json().expect("JSON body");
    assert_eq!(body["student"]["totalMarks"], Value::from(total));
}

#[then(expr = "the focused field is {string}")]
fn focused_field(world: &mut MarksWorld, field: String) {
    let focus = world
        .harness()
        .app
        .state()
        .edit
        .as_ref()
        .map(|edit| edit.focus())
        .expect("dialog open");
    let label = match focus {
        EditField::Name => "Name",
        EditField::Password => "Password",
        EditField::Mark(subject) => subject.title(),
    };
    assert_eq!(label, field);
}
