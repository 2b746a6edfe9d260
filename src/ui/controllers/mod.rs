//! # Controllers Module
//!
//! The controller that wires input, state, the API and the renderer together.

pub mod app_controller;

pub use app_controller::AppController;
