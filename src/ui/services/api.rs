//! # Marks Server Client
//!
//! Thin async client over the four remote operations of the marks server.
//! The server is the only durable store; nothing here caches or retries.

use crate::ui::models::{SessionUser, Student, StudentId};
use reqwest::{Client, Response, Url};
use serde::Serialize;
use thiserror::Error;

/// Literal payload the server answers with for bad credentials
pub const UNAUTHORIZED_PAYLOAD: &str = "Unauthorized";

/// Failures of a remote call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid server url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Bad credentials, as opposed to a network or server failure
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct StudentWriteRequest<'a> {
    student: &'a Student,
    username: &'a str,
}

/// Client for the marks server REST API
#[derive(Debug, Clone)]
pub struct StudentClient {
    http: Client,
    base_url: Url,
}

impl StudentClient {
    /// Create a client rooted at `server`
    pub fn new(server: &str) -> Result<Self, ApiError> {
        let mut base_url =
            Url::parse(server).map_err(|e| ApiError::InvalidUrl(format!("{server}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(server.to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        tracing::debug!("StudentClient rooted at {}", base_url);
        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `POST /login`
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionUser, ApiError> {
        let url = self.endpoint(&["login"])?;
        tracing::debug!("POST {} as '{}'", url, username);

        let response = self
            .http
            .post(url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let body = success_body(response).await?;

        if is_unauthorized_payload(&body) {
            tracing::info!("Login rejected for '{}'", username);
            return Err(ApiError::Unauthorized);
        }

        let user: SessionUser = serde_json::from_str(&body)?;
        tracing::info!("Logged in as '{}'", user.name);
        Ok(user)
    }

    /// `GET /students`
    pub async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        let url = self.endpoint(&["students"])?;
        tracing::debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        let body = success_body(response).await?;
        let students: Vec<Student> = serde_json::from_str(&body)?;

        tracing::debug!("Fetched {} students", students.len());
        Ok(students)
    }

    /// `POST /students/add`
    pub async fn create_student(&self, student: &Student, username: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["students", "add"])?;
        tracing::debug!("POST {} for '{}'", url, student.name);

        let response = self
            .http
            .post(url)
            .json(&StudentWriteRequest { student, username })
            .send()
            .await?;
        ensure_success(&response)?;
        Ok(())
    }

    /// `PUT /students/{id}`
    pub async fn update_student_marks(
        &self,
        id: &StudentId,
        student: &Student,
        username: &str,
    ) -> Result<(), ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&["students", &id])?;
        tracing::debug!("PUT {} for '{}'", url, student.name);

        let response = self
            .http
            .put(url)
            .json(&StudentWriteRequest { student, username })
            .send()
            .await?;
        ensure_success(&response)?;
        Ok(())
    }
}

fn ensure_success(response: &Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}

async fn success_body(response: Response) -> Result<String, ApiError> {
    ensure_success(&response)?;
    Ok(response.text().await?)
}

/// The rejection may arrive as bare text or as a JSON string
fn is_unauthorized_payload(body: &str) -> bool {
    let body = body.trim();
    body == UNAUTHORIZED_PAYLOAD
        || serde_json::from_str::<String>(body).is_ok_and(|s| s == UNAUTHORIZED_PAYLOAD)
}
