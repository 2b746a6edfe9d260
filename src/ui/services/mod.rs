//! # Services Layer
//!
//! Everything that talks to the marks server: the REST client and the
//! dispatcher that runs its calls in the background.

pub mod api;
pub mod dispatcher;

pub use api::{ApiError, StudentClient, UNAUTHORIZED_PAYLOAD};
pub use dispatcher::{ApiEvent, ApiService};
