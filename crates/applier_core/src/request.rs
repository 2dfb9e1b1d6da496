use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Keyword presets offered by the dashboard form.
pub const KEYWORD_OPTIONS: &[&str] = &[
    "web-development",
    "backend-development",
    "front-end-development",
    "machine-learning",
    "data-science",
    "devops",
    "ui-ux-design",
    "blockchain",
];

/// Form defaults.
pub const DEFAULT_KEYWORDS: &str = "web-development";
pub const DEFAULT_MAX_APPLICATIONS: u32 = 20;
pub const DEFAULT_MAX_PAGES: u32 = 2;

/// Upper bounds accepted by the backend.
pub const MAX_APPLICATIONS_LIMIT: u32 = 100;
pub const MAX_PAGES_LIMIT: u32 = 10;

/// How the automation logs in to a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    #[default]
    Email,
    Google,
}

/// Per-platform enablement and credentials.
///
/// The password is only meaningful for [`LoginMethod::Email`]; Google login
/// authenticates out of band and carries an empty password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub enabled: bool,
    pub email: String,
    pub password: String,
    #[serde(rename = "loginMethod", default)]
    pub login_method: LoginMethod,
}

/// One automation run request, built fresh per submission attempt.
///
/// Serializes to the backend's wire shape: `platforms` is a JSON object
/// keyed by platform name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationRequest {
    pub keywords: String,
    pub max_applications: u32,
    pub max_pages: u32,
    pub platforms: BTreeMap<String, PlatformConfig>,
}

impl AutomationRequest {
    /// Local pre-submission validation.
    ///
    /// Mirrors the backend's own checks so a request that passes here is not
    /// rejected for shape reasons server-side. Disabled platforms are not
    /// inspected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_applications < 1 || self.max_applications > MAX_APPLICATIONS_LIMIT {
            return Err(ValidationError::MaxApplicationsOutOfRange {
                value: self.max_applications,
            });
        }
        if self.max_pages < 1 || self.max_pages > MAX_PAGES_LIMIT {
            return Err(ValidationError::MaxPagesOutOfRange {
                value: self.max_pages,
            });
        }

        let mut any_enabled = false;
        for (platform, config) in self.platforms.iter().filter(|(_, c)| c.enabled) {
            any_enabled = true;
            if config.email.trim().is_empty() {
                return Err(ValidationError::EmailRequired {
                    platform: platform.clone(),
                });
            }
            if config.login_method == LoginMethod::Email && config.password.is_empty() {
                return Err(ValidationError::PasswordRequired {
                    platform: platform.clone(),
                });
            }
        }
        if !any_enabled {
            return Err(ValidationError::NoPlatformsEnabled);
        }
        Ok(())
    }
}

/// A request the Collector refuses to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NoPlatformsEnabled,
    EmailRequired { platform: String },
    PasswordRequired { platform: String },
    MaxApplicationsOutOfRange { value: u32 },
    MaxPagesOutOfRange { value: u32 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoPlatformsEnabled => write!(f, "No platforms enabled"),
            ValidationError::EmailRequired { platform } => {
                write!(f, "Email required for {platform}")
            }
            ValidationError::PasswordRequired { platform } => {
                write!(f, "Password required for {platform} with email login")
            }
            ValidationError::MaxApplicationsOutOfRange { value } => {
                write!(
                    f,
                    "Max applications must be between 1 and {MAX_APPLICATIONS_LIMIT} (got {value})"
                )
            }
            ValidationError::MaxPagesOutOfRange { value } => {
                write!(
                    f,
                    "Max pages must be between 1 and {MAX_PAGES_LIMIT} (got {value})"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
