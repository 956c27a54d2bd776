pub mod backoff;
pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod provider;
