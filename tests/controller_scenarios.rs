use crossterm::event::KeyCode;
use markline::ui::models::{StudentId, Subject};
use markline::ui::state::{
    MARKS_UPDATED_ALERT, STUDENT_ADDED_ALERT, UNAUTHORIZED_ALERT,
};
use markline::Screen;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::{admin_json, mount_login, mount_roster, roster_json, Harness};

#[tokio::test]
async fn login_should_fetch_roster_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_partial_json(json!({"username": "admin", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(admin_json("admin")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster_json()))
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = Harness::new(&server.uri());
    harness.log_in("admin", "secret").await;

    assert_eq!(harness.app.state().screen(), Screen::Dashboard);
    assert_eq!(harness.app.state().roster.len(), 3);
    assert!(harness.screen.contains("Welcome admin"));
    assert!(harness.screen.contains("Top 5 Students"));
    server.verify().await;
}

#[tokio::test]
async fn rejected_login_should_alert_and_skip_roster() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Unauthorized"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster_json()))
        .expect(0)
        .mount(&server)
        .await;

    let mut harness = Harness::new(&server.uri());
    harness.type_text("admin");
    harness.press(KeyCode::Tab);
    harness.type_text("wrong");
    harness.press(KeyCode::Enter);
    harness.settle().await;

    assert_eq!(harness.app.state().alert(), Some(UNAUTHORIZED_ALERT));
    assert!(harness.screen.contains("│ Unauthorized │"));

    harness.press(KeyCode::Enter);
    harness.run_keys();
    assert_eq!(harness.app.state().screen(), Screen::Login);
    server.verify().await;
}

#[tokio::test]
async fn out_of_range_mark_should_never_reach_server() {
    let server = MockServer::start().await;
    mount_login(&server, admin_json("admin")).await;
    mount_roster(&server, roster_json()).await;
    Mock::given(method("POST"))
        .and(path("/students/add"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut harness = Harness::new(&server.uri());
    harness.log_in("admin", "secret").await;

    harness.type_text("a");
    harness.type_text("kiran");
    harness.press(KeyCode::Tab);
    harness.type_text("pw");
    harness.press(KeyCode::Tab);
    harness.retype(1, "150");
    harness.press(KeyCode::Enter);
    harness.settle().await;

    assert_eq!(
        harness.app.state().alert(),
        Some("Marks should be between 0 and 100")
    );
    assert!(harness.app.state().edit.is_some());

    harness.press(KeyCode::Enter);
    harness.run_keys();
    assert_eq!(harness.app.state().screen(), Screen::EditDialog);
    server.verify().await;
}

#[tokio::test]
async fn empty_name_should_be_rejected_before_network() {
    let server = MockServer::start().await;
    mount_login(&server, admin_json("admin")).await;
    mount_roster(&server, roster_json()).await;
    Mock::given(method("POST"))
        .and(path("/students/add"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut harness = Harness::new(&server.uri());
    harness.log_in("admin", "secret").await;

    harness.type_text("a");
    harness.press(KeyCode::Enter);
    harness.settle().await;

    assert_eq!(
        harness.app.state().alert(),
        Some("Please enter name and password")
    );
    server.verify().await;
}

#[tokio::test]
async fn adding_student_should_post_and_refetch() {
    let server = MockServer::start().await;
    mount_login(&server, admin_json("admin")).await;
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster_json()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/students/add"))
        .and(body_partial_json(json!({
            "username": "admin",
            "student": {
                "name": "kiran",
                "password": "pw",
                "marks": {"English": 45, "Math": 0},
                "totalMarks": 45
            }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = Harness::new(&server.uri());
    harness.log_in("admin", "secret").await;

    harness.type_text("a");
    harness.type_text("kiran");
    harness.press(KeyCode::Tab);
    harness.type_text("pw");
    harness.press(KeyCode::Tab);
    harness.retype(1, "45");
    harness.press(KeyCode::Enter);
    harness.settle().await;

    assert_eq!(harness.app.state().alert(), Some(STUDENT_ADDED_ALERT));
    assert!(harness.app.state().edit.is_none());
    server.verify().await;
}

#[tokio::test]
async fn updating_math_mark_should_put_recomputed_total_and_refetch() {
    let server = MockServer::start().await;
    mount_login(&server, admin_json("admin")).await;
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster_json()))
        .expect(2)
        .mount(&server)
        .await;
    // asha: 350 total with Math at 60
    Mock::given(method("PUT"))
        .and(path("/students/1"))
        .and(body_partial_json(json!({
            "username": "admin",
            "student": {"name": "asha", "marks": {"Math": 85}, "totalMarks": 375}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = Harness::new(&server.uri());
    harness.log_in("admin", "secret").await;
    assert_eq!(
        harness.app.state().selected_student().and_then(|s| s.id.clone()),
        Some(StudentId::Number(1))
    );

    harness.press(KeyCode::Enter);
    // Name -> Password -> English -> Math
    for _ in 0..3 {
        harness.press(KeyCode::Tab);
    }
    harness.retype(2, "85");
    harness.press(KeyCode::Enter);
    harness.settle().await;

    assert_eq!(harness.app.state().alert(), Some(MARKS_UPDATED_ALERT));
    assert!(harness.screen.contains("Marks updated successfully"));
    server.verify().await;
}

#[tokio::test]
async fn failed_write_should_keep_dialog_open_without_alert() {
    let server = MockServer::start().await;
    mount_login(&server, admin_json("admin")).await;
    mount_roster(&server, roster_json()).await;
    Mock::given(method("PUT"))
        .and(path("/students/1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = Harness::new(&server.uri());
    harness.log_in("admin", "secret").await;

    harness.press(KeyCode::Char('e'));
    harness.press(KeyCode::Enter);
    harness.settle().await;

    let state = harness.app.state();
    assert_eq!(state.screen(), Screen::EditDialog);
    assert_eq!(state.alert(), None);
    assert!(state.edit.as_ref().is_some_and(|edit| !edit.is_saving()));
    server.verify().await;
}

#[tokio::test]
async fn subject_teacher_should_only_reach_own_subject() {
    let server = MockServer::start().await;
    mount_login(&server, common::teacher_json("mr-rao", "Science")).await;
    mount_roster(&server, roster_json()).await;

    let mut harness = Harness::new(&server.uri());
    harness.log_in("mr-rao", "secret").await;

    harness.press(KeyCode::Enter);
    // Name -> Password -> Science, skipping the locked marks
    harness.press(KeyCode::Tab);
    harness.press(KeyCode::Tab);
    harness.run_keys();

    let edit = harness.app.state().edit.as_ref().expect("dialog open");
    assert_eq!(
        edit.focus(),
        markline::ui::models::EditField::Mark(Subject::Science)
    );
    assert!(harness.screen.contains("(locked)"));
}

#[tokio::test]
async fn student_session_should_highlight_own_row_and_refuse_edits() {
    let server = MockServer::start().await;
    mount_login(&server, common::student_session_json("neha")).await;
    mount_roster(&server, roster_json()).await;

    let mut harness = Harness::new(&server.uri());
    harness.log_in("neha", "pw").await;

    harness.type_text("a");
    harness.press(KeyCode::Char('e'));
    harness.run_keys();

    assert_eq!(harness.app.state().screen(), Screen::Dashboard);
    let highlighted = harness.screen.highlighted_rows();
    assert_eq!(highlighted.len(), 1);
    assert!(highlighted[0].contains("neha"));
}

#[tokio::test]
async fn logout_should_return_to_login_and_quit_should_stop() {
    let server = MockServer::start().await;
    mount_login(&server, admin_json("admin")).await;
    mount_roster(&server, roster_json()).await;

    let mut harness = Harness::new(&server.uri());
    harness.log_in("admin", "secret").await;

    harness.type_text("o");
    harness.run_keys();
    assert_eq!(harness.app.state().screen(), Screen::Login);
    assert!(harness.app.state().roster.is_empty());
    assert!(harness.screen.contains("Log In to view Student Details"));

    harness.keys.push_ctrl('c');
    harness.run_keys();
    assert!(harness.app.should_quit());
}
