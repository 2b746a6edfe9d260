//! # API Dispatcher
//!
//! Runs remote calls off the event loop. Each effect is executed in its own
//! tokio task and the outcome is sent back through a channel that the
//! controller polls without blocking.

use super::api::{ApiError, StudentClient};
use crate::ui::models::{SessionUser, Student};
use crate::ui::state::{DraftId, Effect};
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 16;

/// Outcome of a remote call, fed back into the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum ApiEvent {
    LoggedIn(SessionUser),
    LoginRejected,
    LoginFailed(String),
    RosterLoaded(Vec<Student>),
    RosterFailed(String),
    /// Writes carry the draft that sent them
    StudentCreated(DraftId),
    StudentUpdated(DraftId),
    WriteFailed(DraftId, String),
}

/// Executes effects asynchronously and collects their results
pub struct ApiService {
    client: StudentClient,
    event_sender: mpsc::Sender<ApiEvent>,
    event_receiver: mpsc::Receiver<ApiEvent>,
}

impl ApiService {
    pub fn new(client: StudentClient) -> Self {
        let (event_sender, event_receiver) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            client,
            event_sender,
            event_receiver,
        }
    }

    /// Spawn the remote call for an effect
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, effect: Effect) {
        let client = self.client.clone();
        let sender = self.event_sender.clone();

        tokio::spawn(async move {
            let event = execute(&client, effect).await;
            // Receiver gone means the app is shutting down
            let _ = sender.send(event).await;
        });
    }

    /// Next finished call, if any (non-blocking)
    pub fn poll_event(&mut self) -> Option<ApiEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Wait for the next finished call
    pub async fn next_event(&mut self) -> Option<ApiEvent> {
        self.event_receiver.recv().await
    }
}

async fn execute(client: &StudentClient, effect: Effect) -> ApiEvent {
    match effect {
        Effect::Authenticate { username, password } => {
            match client.authenticate(&username, &password).await {
                Ok(user) => ApiEvent::LoggedIn(user),
                Err(ApiError::Unauthorized) => ApiEvent::LoginRejected,
                Err(e) => {
                    let message = error_chain(&e);
                    tracing::error!("Login request failed: {message}");
                    ApiEvent::LoginFailed(message)
                }
            }
        }
        Effect::FetchRoster => match client.list_students().await {
            Ok(students) => ApiEvent::RosterLoaded(students),
            Err(e) => {
                let message = error_chain(&e);
                tracing::error!("Fetching students failed: {message}");
                ApiEvent::RosterFailed(message)
            }
        },
        Effect::CreateStudent {
            draft,
            student,
            username,
        } => match client.create_student(&student, &username).await {
            Ok(()) => ApiEvent::StudentCreated(draft),
            Err(e) => {
                let message = error_chain(&e);
                tracing::warn!("Adding student '{}' failed: {message}", student.name);
                ApiEvent::WriteFailed(draft, message)
            }
        },
        Effect::UpdateStudent {
            draft,
            id,
            student,
            username,
        } => match client.update_student_marks(&id, &student, &username).await {
            Ok(()) => ApiEvent::StudentUpdated(draft),
            Err(e) => {
                let message = error_chain(&e);
                tracing::warn!("Updating student {id} failed: {message}");
                ApiEvent::WriteFailed(draft, message)
            }
        },
    }
}

fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(&format!("\n  Caused by: {cause}"));
        source = cause.source();
    }
    message
}
