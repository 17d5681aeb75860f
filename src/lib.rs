pub mod api;
pub mod commands;
pub mod config;
pub mod controller;
pub mod health;
pub mod interpret;
pub mod logger;
pub mod presets;
pub mod session;
pub mod state;
pub mod ui;
