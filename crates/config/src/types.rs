//! Configuration types for the Nimbus provider.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Which platform environment the provider's backend points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Production,
    Staging,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Staging => write!(f, "staging"),
        }
    }
}

/// Resolved provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Project used when a configuration omits the `project` lookup key.
    pub default_project: Option<String>,
    /// Platform environment the backend targets.
    pub environment: Environment,
    /// Per-read timeout budget (serialized as seconds).
    #[serde(with = "duration_seconds")]
    pub request_timeout: Duration,
    /// Name of the profile these settings were loaded from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_project: None,
            environment: Environment::Production,
            request_timeout: Duration::from_secs(30),
            profile: None,
        }
    }
}

/// One named profile as stored in the profiles file.
///
/// All fields are optional; unset values fall back to environment
/// variables and then to [`Settings::default`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileSettings {
    pub default_project: Option<String>,
    pub environment: Option<Environment>,
    pub request_timeout_secs: Option<u64>,
}

/// On-disk shape of the profiles file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileSettings>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_environment_from_str() {
        assert_eq!("production".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(" Staging ".parse::<Environment>(), Ok(Environment::Staging));
        assert!("prod".parse::<Environment>().is_err());
    }

    #[test]
    fn test_settings_roundtrip() {
        let settings = Settings {
            default_project: Some("analytics".to_string()),
            environment: Environment::Staging,
            request_timeout: Duration::from_secs(10),
            profile: None,
        };
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["request_timeout"], json!(10));
        let back: Settings = serde_json::from_value(value).unwrap();
        assert_eq!(back.request_timeout, Duration::from_secs(10));
        assert_eq!(back.environment, Environment::Staging);
    }

    #[test]
    fn test_profiles_file_tolerates_missing_map() {
        let file: ProfilesFile = serde_json::from_str("{}").unwrap();
        assert!(file.profiles.is_empty());
    }
}
