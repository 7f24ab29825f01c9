pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod dishes;
pub mod error;
pub mod harness;
pub mod state;
pub mod telemetry;
