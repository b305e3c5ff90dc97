//! Settings loader for environment variables and profile files.
//!
//! Responsibilities:
//! - Load provider settings from `.env` files, environment variables, and
//!   the JSON profiles file.
//! - Provide a builder-pattern `SettingsLoader` for hierarchical merging.
//! - Enforce the `DOTENV_DISABLED` gate so tests never pick up a stray
//!   `.env` file.
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over profile file values.
//! - `load_dotenv()` must be called explicitly to enable `.env` loading.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::types::{Environment, ProfileSettings, ProfilesFile, Settings};

/// Errors that can occur during settings loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Profile '{0}' not found in profiles file")]
    ProfileNotFound(String),

    #[error("Unable to determine config directory: {0}")]
    ConfigDirUnavailable(String),

    #[error("Failed to read profiles file at {path}")]
    ProfilesFileRead { path: PathBuf },

    #[error("Failed to parse profiles file at {path}")]
    ProfilesFileParse { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Default location of the profiles file.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = directories::ProjectDirs::from("io", "nimbus", "nimbus-provider")
        .ok_or_else(|| {
            ConfigError::ConfigDirUnavailable("no home directory available".to_string())
        })?;
    Ok(proj_dirs.config_dir().join("profiles.json"))
}

fn read_profiles_file(path: &PathBuf) -> Result<ProfilesFile, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::ProfilesFileRead {
        path: path.clone(),
    })?;
    serde_json::from_str(&raw).map_err(|_| ConfigError::ProfilesFileParse { path: path.clone() })
}

/// Settings loader that merges environment variables over profile values.
#[derive(Debug, Default)]
pub struct SettingsLoader {
    default_project: Option<String>,
    environment: Option<Environment>,
    request_timeout: Option<Duration>,
    profile_name: Option<String>,
    config_path: Option<PathBuf>,
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// If the `DOTENV_DISABLED` environment variable is set to "true" or
    /// "1", the `.env` file is not loaded (useful for testing).
    pub fn load_dotenv(self) -> Self {
        let disabled = matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        );
        if !disabled {
            dotenvy::dotenv().ok();
        }
        self
    }

    /// Set the profile to load from the profiles file.
    pub fn with_profile(mut self, name: impl Into<String>) -> Self {
        self.profile_name = Some(name.into());
        self
    }

    /// Override the profiles file path (primarily for testing).
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Read an environment variable, returning None if unset, empty, or
    /// whitespace-only.
    pub fn env_var_or_none(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

    /// Read settings from environment variables.
    ///
    /// Recognized variables: `NIMBUS_DEFAULT_PROJECT`, `NIMBUS_ENVIRONMENT`,
    /// `NIMBUS_TIMEOUT_SECS`, `NIMBUS_PROFILE`.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        if let Some(project) = Self::env_var_or_none("NIMBUS_DEFAULT_PROJECT") {
            self.default_project = Some(project);
        }
        if let Some(env) = Self::env_var_or_none("NIMBUS_ENVIRONMENT") {
            self.environment =
                Some(
                    env.parse()
                        .map_err(|message| ConfigError::InvalidValue {
                            var: "NIMBUS_ENVIRONMENT".to_string(),
                            message,
                        })?,
                );
        }
        if let Some(timeout) = Self::env_var_or_none("NIMBUS_TIMEOUT_SECS") {
            let secs: u64 = timeout.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "NIMBUS_TIMEOUT_SECS".to_string(),
                message: "must be a positive integer".to_string(),
            })?;
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if self.profile_name.is_none()
            && let Some(profile) = Self::env_var_or_none("NIMBUS_PROFILE")
        {
            self.profile_name = Some(profile);
        }
        Ok(self)
    }

    fn apply_profile(&mut self, profile: &ProfileSettings) {
        // Profile values only fill slots the environment left empty.
        if self.default_project.is_none() {
            self.default_project = profile.default_project.clone();
        }
        if self.environment.is_none() {
            self.environment = profile.environment;
        }
        if self.request_timeout.is_none() {
            self.request_timeout = profile.request_timeout_secs.map(Duration::from_secs);
        }
    }

    /// Resolve the final settings.
    pub fn load(mut self) -> Result<Settings, ConfigError> {
        if let Some(name) = self.profile_name.clone() {
            let path = match &self.config_path {
                Some(path) => path.clone(),
                None => default_config_path()?,
            };
            let file = read_profiles_file(&path)?;
            let profile = file
                .profiles
                .get(&name)
                .ok_or_else(|| ConfigError::ProfileNotFound(name.clone()))?;
            self.apply_profile(profile);
            debug!(profile = %name, "applied settings profile");
        }

        let defaults = Settings::default();
        Ok(Settings {
            default_project: self.default_project,
            environment: self.environment.unwrap_or(defaults.environment),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            profile: self.profile_name,
        })
    }
}
