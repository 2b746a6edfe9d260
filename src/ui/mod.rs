//! # Terminal Interface
//!
//! Everything between the keyboard and the marks server.

pub mod commands;
pub mod controllers;
pub mod io;
pub mod models;
pub mod services;
pub mod state;
pub mod view_models;
pub mod views;

pub use controllers::AppController;
pub use io::{EventStream, RenderStream};
pub use state::{update, Action, AppState, Effect, Screen};
