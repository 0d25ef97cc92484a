pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod models;
pub mod observability;
pub mod report;
pub mod setup;
pub mod state;
pub mod support;
pub mod system;
