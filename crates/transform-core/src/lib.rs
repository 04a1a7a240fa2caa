//! # transform-core
//!
//! Core crate for the KBase transform shims. Contains the configuration
//! schemas (installation root, external tool settings, logging) and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other transform crates.

pub mod config;
pub mod error;
pub mod result;

pub use config::TransformConfig;
pub use error::{AppError, ErrorKind};
pub use result::AppResult;
