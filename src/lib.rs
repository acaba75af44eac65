// Library interface for rust_ticket_scraper
// The console binary and the integration tests both build on these modules

pub mod browser;
pub mod cache;
pub mod commands;
pub mod config;
pub mod console;
pub mod extract;
pub mod helpers;
pub mod media;
pub mod models;
pub mod render;
pub mod service;
