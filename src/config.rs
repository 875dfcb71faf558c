use serde::Serialize;

use crate::error::{Error, Result};

pub const DASHBOARD_TITLE: &str = "dashboard_title";
pub const COMPANY_NAME: &str = "company_name";
pub const WELCOME_MESSAGE: &str = "welcome_message";
pub const TAGLINE: &str = "tagline";

/// Keys accepted by `config set`.
pub const KNOWN_KEYS: [&str; 4] = [DASHBOARD_TITLE, COMPANY_NAME, WELCOME_MESSAGE, TAGLINE];

/// Dashboard branding text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardConfig {
    pub dashboard_title: String,
    pub company_name: String,
    pub welcome_message: String,
    pub tagline: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dashboard_title: "Forge Analytics".to_string(),
            company_name: "Your Company".to_string(),
            welcome_message: "Welcome to your advanced analytics workspace".to_string(),
            tagline: "Data-driven insights for tomorrow".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Build from stored key/value pairs. Missing or blank values keep their
    /// defaults; unrecognized keys are ignored.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut config = Self::default();
        for (key, value) in pairs {
            if value.trim().is_empty() {
                continue;
            }
            let slot = match key {
                DASHBOARD_TITLE => &mut config.dashboard_title,
                COMPANY_NAME => &mut config.company_name,
                WELCOME_MESSAGE => &mut config.welcome_message,
                TAGLINE => &mut config.tagline,
                _ => continue,
            };
            *slot = value.to_string();
        }
        config
    }
}

/// Reject keys the dashboard does not know about.
pub fn validate_key(key: &str) -> Result<()> {
    if KNOWN_KEYS.contains(&key) {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "unknown config key '{key}' (expected one of: {})",
            KNOWN_KEYS.join(", ")
        )))
    }
}
