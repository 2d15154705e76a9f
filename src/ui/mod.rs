pub mod client_wizard;
pub mod clients;
pub mod components;
pub mod not_found;
pub mod phone_demo;
pub mod plugins;
