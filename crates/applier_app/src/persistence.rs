use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use applier_core::{
    LoginMethod, PlatformConfig, DEFAULT_KEYWORDS, DEFAULT_MAX_APPLICATIONS, DEFAULT_MAX_PAGES,
};
use applier_logging::{applier_error, applier_info, applier_warn};
use serde::{Deserialize, Serialize};

const PREFS_FILENAME: &str = "applier_prefs.ron";

/// Form values carried across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Preferences {
    pub keywords: String,
    pub max_applications: u32,
    pub max_pages: u32,
    pub platforms: BTreeMap<String, PlatformConfig>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.to_string(),
            max_applications: DEFAULT_MAX_APPLICATIONS,
            max_pages: DEFAULT_MAX_PAGES,
            platforms: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedPlatform {
    name: String,
    enabled: bool,
    email: String,
    password: String,
    login_method: LoginMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedPreferences {
    keywords: String,
    max_applications: u32,
    max_pages: u32,
    platforms: Vec<PersistedPlatform>,
}

pub(crate) fn load_preferences(dir: &Path) -> Preferences {
    let path = dir.join(PREFS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Preferences::default();
        }
        Err(err) => {
            applier_warn!("Failed to read preferences from {:?}: {}", path, err);
            return Preferences::default();
        }
    };

    let persisted: PersistedPreferences = match ron::from_str(&content) {
        Ok(prefs) => prefs,
        Err(err) => {
            applier_warn!("Failed to parse preferences from {:?}: {}", path, err);
            return Preferences::default();
        }
    };

    let platforms = persisted
        .platforms
        .into_iter()
        .map(|platform| {
            (
                platform.name,
                PlatformConfig {
                    enabled: platform.enabled,
                    email: platform.email,
                    password: platform.password,
                    login_method: platform.login_method,
                },
            )
        })
        .collect();

    applier_info!("Loaded preferences from {:?}", path);
    Preferences {
        keywords: persisted.keywords,
        max_applications: persisted.max_applications,
        max_pages: persisted.max_pages,
        platforms,
    }
}

pub(crate) fn save_preferences(dir: &Path, preferences: &Preferences) {
    let persisted = PersistedPreferences {
        keywords: preferences.keywords.clone(),
        max_applications: preferences.max_applications,
        max_pages: preferences.max_pages,
        platforms: preferences
            .platforms
            .iter()
            .map(|(name, config)| PersistedPlatform {
                name: name.clone(),
                enabled: config.enabled,
                email: config.email.clone(),
                password: config.password.clone(),
                login_method: config.login_method,
            })
            .collect(),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&persisted, pretty) {
        Ok(text) => text,
        Err(err) => {
            applier_error!("Failed to serialize preferences: {}", err);
            return;
        }
    };

    if let Err(err) = write_atomically(dir, PREFS_FILENAME, &content) {
        applier_error!("Failed to write preferences to {:?}: {}", dir, err);
    }
}

/// Write a temp file then rename, so a crash never truncates the prefs.
fn write_atomically(dir: &Path, filename: &str, content: &str) -> std::io::Result<()> {
    let target = dir.join(filename);
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_preferences() -> Preferences {
        let mut platforms = BTreeMap::new();
        platforms.insert(
            "internshala".to_string(),
            PlatformConfig {
                enabled: true,
                email: "a@b.com".to_string(),
                password: "hunter2".to_string(),
                login_method: LoginMethod::Email,
            },
        );
        platforms.insert(
            "linkedin".to_string(),
            PlatformConfig {
                enabled: false,
                email: String::new(),
                password: String::new(),
                login_method: LoginMethod::Google,
            },
        );
        Preferences {
            keywords: "machine-learning".to_string(),
            max_applications: 50,
            max_pages: 5,
            platforms,
        }
    }

    #[test]
    fn preferences_survive_a_save_and_load_cycle() {
        let dir = tempfile::tempdir().expect("temp dir");
        let preferences = sample_preferences();

        save_preferences(dir.path(), &preferences);
        let loaded = load_preferences(dir.path());

        assert_eq!(loaded, preferences);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let loaded = load_preferences(dir.path());
        assert_eq!(loaded, Preferences::default());
        assert_eq!(loaded.keywords, "web-development");
        assert_eq!(loaded.max_applications, 20);
        assert_eq!(loaded.max_pages, 2);
    }

    #[test]
    fn unparseable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join(PREFS_FILENAME), "not ron at all {{{").expect("write");
        let loaded = load_preferences(dir.path());
        assert_eq!(loaded, Preferences::default());
    }

    #[test]
    fn save_replaces_an_existing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        save_preferences(dir.path(), &Preferences::default());

        let mut updated = sample_preferences();
        updated.max_pages = 10;
        save_preferences(dir.path(), &updated);

        let loaded = load_preferences(dir.path());
        assert_eq!(loaded.max_pages, 10);
        assert_eq!(loaded.keywords, "machine-learning");
    }
}
