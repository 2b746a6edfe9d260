use crate::common::{
    admin_json, mount_login, mount_roster, roster_json, student_session_json, teacher_json,
};
use crate::steps::world::MarksWorld;
use crossterm::event::KeyCode;
use cucumber::{given, then, when};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[given(expr = "the marks server knows the admin {string}")]
async fn server_knows_admin(world: &mut MarksWorld, name: String) {
    mount_login(world.server().await, admin_json(&name)).await;
}

#[given(expr = "the marks server knows the student {string}")]
async fn server_knows_student(world: &mut MarksWorld, name: String) {
    mount_login(world.server().await, student_session_json(&name)).await;
}

#[given(expr = "the marks server knows the {string} teacher {string}")]
async fn server_knows_teacher(world: &mut MarksWorld, subject: String, name: String) {
    mount_login(world.server().await, teacher_json(&name, &subject)).await;
}

#[given("the marks server rejects every login")]
async fn server_rejects_logins(world: &mut MarksWorld) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Unauthorized"))
        .mount(world.server().await)
        .await;
}

#[given("the server has the default roster")]
async fn server_has_roster(world: &mut MarksWorld) {
    mount_roster(world.server().await, roster_json()).await;
}

#[given(expr = "I log in as {string} with password {string}")]
#[when(expr = "I log in as {string} with password {string}")]
async fn log_in(world: &mut MarksWorld, username: String, password: String) {
    world.harness().log_in(&username, &password).await;
}

#[when(expr = "I submit the login form as {string} with password {string}")]
async fn submit_login(world: &mut MarksWorld, username: String, password: String) {
    let harness = world.harness();
    harness.type_text(&username);
    harness.press(KeyCode::Tab);
    harness.type_text(&password);
    harness.press(KeyCode::Enter);
    harness.settle().await;
}

#[when(expr = "I press {string}")]
async fn press_key(world: &mut MarksWorld, key: String) {
    let harness = world.harness();
    match key.as_str() {
        "Enter" => harness.press(KeyCode::Enter),
        "Esc" => harness.press(KeyCode::Esc),
        "Tab" => harness.press(KeyCode::Tab),
        "Down" => harness.press(KeyCode::Down),
        text => harness.type_text(text),
    }
    harness.settle().await;
}

#[then(expr = "I see {string}")]
fn screen_shows(world: &mut MarksWorld, text: String) {
    let screen = &world.harness().screen;
    assert!(screen.contains(&text), "{text:?} not on screen:\n{}", screen.text());
}

#[then(expr = "the alert reads {string}")]
fn alert_reads(world: &mut MarksWorld, message: String) {
    assert_eq!(world.harness().app.state().alert(), Some(message.as_str()));
}

#[then(expr = "the screen is {string}")]
fn screen_is(world: &mut MarksWorld, screen: String) {
    let current = world.harness().app.state().screen();
    assert_eq!(format!("{current:?}"), screen);
}

#[then(expr = "the roster was fetched {int} time(s)")]
async fn roster_fetch_count(world: &mut MarksWorld, count: usize) {
    assert_eq!(world.requests("GET", "/students").await.len(), count);
}
