pub mod app;
pub mod cli;
pub mod config;
pub mod content;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod locale;
pub mod middleware;
pub mod services;
