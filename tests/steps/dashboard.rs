use crate::steps::world::MarksWorld;
use cucumber::then;
use markline::ui::models::Subject;
use markline::ui::view_models::{subject_topper, top_students};

fn subject_by_title(title: &str) -> Subject {
    Subject::ALL
        .into_iter()
        .find(|subject| subject.title() == title)
        .unwrap_or_else(|| panic!("unknown subject {title:?}"))
}

#[then(expr = "the top students are {string}")]
fn top_students_are(world: &mut MarksWorld, expected: String) {
    let roster = &world.harness().app.state().roster;
    let names: Vec<&str> = top_students(roster)
        .into_iter()
        .map(|student| student.name.as_str())
        .collect();
    assert_eq!(names.join(", "), expected);
}

#[then(expr = "the topper of {string} is {string} with {int}")]
fn topper_is(world: &mut MarksWorld, subject: String, name: String, mark: i32) {
    let roster = &world.harness().app.state().roster;
    let topper = subject_topper(roster, subject_by_title(&subject)).expect("a topper");
    assert_eq!(topper.student.name, name);
    assert_eq!(topper.mark, mark);
}

#[then("my own row is highlighted")]
fn own_row_highlighted(world: &mut MarksWorld) {
    let harness = world.harness();
    let own = harness
        .app
        .state()
        .session
        .user()
        .map(|user| user.name.clone())
        .expect("logged in");
    let highlighted = harness.screen.highlighted_rows();
    assert_eq!(highlighted.len(), 1, "highlighted rows: {highlighted:?}");
    assert!(highlighted[0].contains(&own));
}
