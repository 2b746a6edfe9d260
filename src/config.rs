//! Configuration constants and utilities for markline
//!
//! Profiles live in an INI file, one section per profile:
//!
//! ```ini
//! [default]
//! server = https://student-server.collegestorehub.com
//! username = admin
//! ```

use anyhow::{Context, Result};
use ini::Ini;
use reqwest::Url;
use std::path::{Path, PathBuf};

/// Default profile file path for markline
pub const DEFAULT_PROFILE_PATH: &str = "~/.markline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "MARKLINE_PROFILE_PATH";

/// Default log file path
pub const DEFAULT_LOG_FILE: &str = "~/.markline/markline.log";

/// Environment variable name for overriding the log file
pub const LOG_FILE_ENV_VAR: &str = "MARKLINE_LOG_FILE";

/// Environment variable holding an env-filter directive
pub const LOG_LEVEL_ENV_VAR: &str = "MARKLINE_LOG_LEVEL";

/// Server used when neither the profile nor the command line names one
pub const DEFAULT_SERVER: &str = "https://student-server.collegestorehub.com";

fn env_or(name: &str, default: &str) -> String {
    std::env::var_os(name)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| default.to_string())
}

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    env_or(PROFILE_PATH_ENV_VAR, DEFAULT_PROFILE_PATH)
}

/// Get the log file path with `~` expanded
pub fn get_log_file_path() -> PathBuf {
    let path = env_or(LOG_FILE_ENV_VAR, DEFAULT_LOG_FILE);
    PathBuf::from(shellexpand::tilde(&path).into_owned())
}

/// Connection settings for one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    server: Option<String>,
    username: Option<String>,
}

impl Profile {
    pub fn new(server: Option<String>, username: Option<String>) -> Self {
        Self { server, username }
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Server to talk to: `override_server` first, then the profile, then the default
    pub fn resolve_server(&self, override_server: Option<&str>) -> Result<Url> {
        let server = override_server
            .or(self.server())
            .unwrap_or(DEFAULT_SERVER);
        Url::parse(server).with_context(|| format!("Invalid server URL '{server}'"))
    }
}

/// Profile with no settings, used when the file or section is missing
pub fn get_blank_profile() -> Profile {
    Profile::new(None, None)
}

/// Reads profiles from an INI file
pub struct IniProfileStore {
    path: PathBuf,
}

impl IniProfileStore {
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(shellexpand::tilde(path).into_owned()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a profile by section name
    ///
    /// A missing file yields `Ok(None)`; an unreadable one is an error.
    pub fn get_profile(&self, name: &str) -> Result<Option<Profile>> {
        if !self.path.exists() {
            tracing::debug!("Profile file '{}' does not exist", self.path.display());
            return Ok(None);
        }

        let ini = Ini::load_from_file(&self.path)
            .with_context(|| format!("Failed to read profile file '{}'", self.path.display()))?;

        Ok(ini.section(Some(name)).map(|section| {
            let value = |key: &str| {
                section
                    .get(key)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from)
            };
            Profile::new(value("server"), value("username"))
        }))
    }

    /// Profile by name, or the blank profile when absent
    pub fn load_or_blank(&self, name: &str) -> Result<Profile> {
        match self.get_profile(name)? {
            Some(profile) => {
                tracing::debug!("Profile '{}' loaded, server: {:?}", name, profile.server());
                Ok(profile)
            }
            None => {
                tracing::debug!("Profile '{}' not found, using blank profile", name);
                Ok(get_blank_profile())
            }
        }
    }
}
