pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod monitor;
pub mod processor;
pub mod simulator;
pub mod stdin;
pub mod store;
