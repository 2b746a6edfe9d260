//! Shared fixtures for the integration suites
#![allow(dead_code)]

use crossterm::event::KeyCode;
use markline::ui::io::{MockEventHandle, MockEventStream, MockRenderStream, ScreenCapture};
use markline::ui::services::StudentClient;
use markline::{AppController, AppState};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// How long `settle` waits for another API reply before calling it quiet
const QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Marks in subject order: English, Math, Hindi, Science, Social Science
pub fn student_json(id: u64, name: &str, marks: [i32; 5]) -> Value {
    json!({
        "id": id,
        "name": name,
        "password": "pw",
        "marks": {
            "English": marks[0],
            "Math": marks[1],
            "Hindi": marks[2],
            "Science": marks[3],
            "SocialScience": marks[4],
        },
        "totalMarks": marks.iter().sum::<i32>(),
    })
}

pub fn roster_json() -> Value {
    json!([
        student_json(1, "asha", [70, 60, 80, 90, 50]),
        student_json(2, "ravi", [95, 85, 75, 65, 55]),
        student_json(3, "neha", [60, 99, 70, 80, 90]),
    ])
}

pub fn admin_json(name: &str) -> Value {
    json!({ "name": name, "student": false })
}

pub fn student_session_json(name: &str) -> Value {
    json!({ "name": name, "student": true })
}

pub fn teacher_json(name: &str, subject: &str) -> Value {
    json!({ "name": name, "student": false, "subject": subject })
}

pub async fn mount_login(server: &MockServer, session: Value) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session))
        .mount(server)
        .await;
}

pub async fn mount_roster(server: &MockServer, roster: Value) {
    Mock::given(method("GET"))
        .and(path("/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roster))
        .mount(server)
        .await;
}

/// The real controller driven by scripted keys against a captured screen
pub struct Harness {
    pub app: AppController<MockEventStream, MockRenderStream>,
    pub keys: MockEventHandle,
    pub screen: ScreenCapture,
}

impl Harness {
    pub fn new(server_uri: &str) -> Self {
        Self::with_state(server_uri, AppState::new())
    }

    pub fn with_state(server_uri: &str, state: AppState) -> Self {
        let events = MockEventStream::empty();
        let keys = events.handle();
        let render_stream = MockRenderStream::with_size((120, 60));
        let screen = render_stream.capture();
        let client = StudentClient::new(server_uri).expect("valid mock server url");
        let app = AppController::with_client(client, state, events, render_stream)
            .expect("controller should start");
        Self { app, keys, screen }
    }

    /// Process every queued key
    pub fn run_keys(&mut self) {
        while self.keys.pending() > 0 && !self.app.should_quit() {
            self.app.tick(Duration::ZERO).expect("tick should succeed");
        }
        self.app.render_if_needed().expect("render should succeed");
    }

    /// Process queued keys, then wait for API replies until the server goes quiet
    pub async fn settle(&mut self) {
        self.run_keys();
        while self.app.await_api_event(QUIET_PERIOD).await {
            self.run_keys();
        }
        self.app.render_if_needed().expect("render should succeed");
    }

    pub fn type_text(&mut self, text: &str) {
        self.keys.type_text(text);
    }

    pub fn press(&mut self, code: KeyCode) {
        self.keys.push_key(code);
    }

    /// Replace the focused field's text
    pub fn retype(&mut self, old_len: usize, text: &str) {
        for _ in 0..old_len {
            self.press(KeyCode::Backspace);
        }
        self.type_text(text);
    }

    /// Fill the login form, submit, wait for the roster, and dismiss the greeting
    pub async fn log_in(&mut self, username: &str, password: &str) {
        self.type_text(username);
        self.press(KeyCode::Tab);
        self.type_text(password);
        self.press(KeyCode::Enter);
        self.settle().await;
        if self.app.state().alert().is_some() {
            self.press(KeyCode::Enter);
            self.run_keys();
        }
    }
}
