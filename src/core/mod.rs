pub mod app;
pub mod config;
pub mod markdown;
pub mod transcript;
