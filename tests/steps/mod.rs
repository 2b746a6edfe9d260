pub mod dashboard;
pub mod editing;
pub mod session;
pub mod world;
