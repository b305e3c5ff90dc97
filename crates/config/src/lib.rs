//! Configuration management for the Nimbus provider.
//!
//! This crate provides types and loaders for provider settings sourced
//! from environment variables and JSON profile files.

mod loader;
pub mod types;

pub use loader::{ConfigError, SettingsLoader, default_config_path};
pub use types::{Environment, ProfileSettings, ProfilesFile, Settings};
