use crate::common::Harness;
use cucumber::World;
use std::fmt;
use wiremock::{MockServer, Request};

/// State shared by the steps of one scenario
#[derive(World)]
#[world(init = Self::new)]
pub struct MarksWorld {
    /// Stand-in marks server, started by the first Given step
    pub server: Option<MockServer>,
    harness: Option<Harness>,
}

impl fmt::Debug for MarksWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarksWorld")
            .field("server", &self.server.as_ref().map(MockServer::uri))
            .field("screen", &self.harness.as_ref().map(|h| h.app.state().screen()))
            .finish()
    }
}

impl MarksWorld {
    fn new() -> Self {
        Self {
            server: None,
            harness: None,
        }
    }

    pub async fn server(&mut self) -> &MockServer {
        if self.server.is_none() {
            self.server = Some(MockServer::start().await);
        }
        self.server.as_ref().expect("server started above")
    }

    /// The controller under test, created on first use
    pub fn harness(&mut self) -> &mut Harness {
        let uri = self
            .server
            .as_ref()
            .map(MockServer::uri)
            .expect("a Given step must start the server first");
        self.harness.get_or_insert_with(|| Harness::new(&uri))
    }

    /// Requests the server saw with the given method and path
    pub async fn requests(&self, method: &str, path: &str) -> Vec<Request> {
        let Some(server) = &self.server else {
            return Vec::new();
        };
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.method.as_str() == method && request.url.path() == path)
            .collect()
    }
}
