pub mod auth;
pub mod google;
mod google_models;
mod http;

pub use auth::KeyringAuth;
pub use google::GoogleSheetsClient;
