//! Configuration module for teamfin
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TeamFinPaths;
pub use settings::{MemberRole, Settings};
