//! Mock backend for the MedTrack application
//!
//! Serves the medication and reminder REST surface over static mock data.
//! Nothing is persisted.

pub mod config;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use config::ApiConfig;
pub use routes::create_router;
pub use state::AppState;
