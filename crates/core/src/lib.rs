//! Core types and shared functionality for toolbench.
//!
//! This crate provides:
//! - Unified error types
//! - Configuration structures
//! - SQL execution and result rendering

pub mod config;
pub mod error;
pub mod sql;

pub use config::{AppConfig, ConfigError, Transport};
pub use error::Error;
pub use sql::{ChatMessage, SqlExecutor, SqlOutcome};
