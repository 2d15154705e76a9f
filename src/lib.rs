pub mod api;
pub mod app;
pub mod config;
pub mod models;
pub mod router;
pub mod telemetry;
pub mod ui;
pub mod validation;
