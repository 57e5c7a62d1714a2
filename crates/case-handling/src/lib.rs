pub mod config;
pub mod error;
pub mod handling;
pub mod telemetry;
