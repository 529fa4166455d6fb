//! Client for the remote hosting service REST API.
pub mod config;
pub mod github;
pub mod traits;
pub mod types;
