pub mod config;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod models;
pub mod profile;
pub mod prompt;
pub mod routes;
