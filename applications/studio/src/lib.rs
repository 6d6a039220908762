//! Museq Studio harness library
//!
//! Configuration, argument helpers and the headless demo, exposed for testing.

pub mod cli;
pub mod config;
pub mod demo;
pub mod error;

pub use config::AppConfig;
pub use demo::{run_demo, DemoOptions, DemoReport};
pub use error::{Result, StudioAppError};
