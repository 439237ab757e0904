//! Choice between live and static adapters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where adapters will run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// A DOM is present; elements are instantiated and events wired
    Browser,
    /// No DOM; elements are rendered to markup
    Server,
}

impl Environment {
    /// Decided at compile time: wasm32 builds run in a browser.
    pub const fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            Environment::Browser
        } else {
            Environment::Server
        }
    }

    pub fn is_browser(self) -> bool {
        matches!(self, Environment::Browser)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Browser => f.write_str("browser"),
            Environment::Server => f.write_str("server"),
        }
    }
}

/// Configured environment; `Auto` defers to [`Environment::detect`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentSetting {
    #[default]
    Auto,
    Browser,
    Server,
}

impl EnvironmentSetting {
    pub fn resolve(self) -> Environment {
        match self {
            EnvironmentSetting::Auto => Environment::detect(),
            EnvironmentSetting::Browser => Environment::Browser,
            EnvironmentSetting::Server => Environment::Server,
        }
    }
}

impl FromStr for EnvironmentSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(EnvironmentSetting::Auto),
            "browser" => Ok(EnvironmentSetting::Browser),
            "server" => Ok(EnvironmentSetting::Server),
            other => Err(format!(
                "unknown environment '{other}' (expected auto, browser or server)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_builds_detect_server() {
        #[cfg(not(target_arch = "wasm32"))]
        assert_eq!(Environment::detect(), Environment::Server);
    }

    #[test]
    fn explicit_settings_override_detection() {
        assert_eq!(EnvironmentSetting::Browser.resolve(), Environment::Browser);
        assert_eq!(EnvironmentSetting::Server.resolve(), Environment::Server);
        assert_eq!(EnvironmentSetting::Auto.resolve(), Environment::detect());
    }

    #[test]
    fn parses_settings() {
        assert_eq!(
            "Server".parse::<EnvironmentSetting>(),
            Ok(EnvironmentSetting::Server)
        );
        assert!("desktop".parse::<EnvironmentSetting>().is_err());
    }
}
