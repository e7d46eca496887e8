use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{Result, TabHeroError};
use crate::models::storage::SETTINGS_DIR;

const USER_CONFIG_DIR: &str = "tabhero";
const USER_CONFIG_FILENAME: &str = "config.toml";
const WORKSPACE_CONFIG_FILENAME: &str = "tab-hero.toml";

/// Toggles for the prompts shown by the commands. They never change what is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Record the current git branch and offer branch scoping
    pub git_branch_scoping: bool,
    /// Ask which open files go into a new set
    pub file_selection: bool,
    /// Ask for a name instead of generating one
    pub naming: bool,
    /// Offer marking sets as favorites
    pub favorites: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git_branch_scoping: true,
            file_selection: true,
            naming: true,
            favorites: true,
        }
    }
}

/// One config file; unset keys leave the lower layer in place
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    git_branch_scoping: Option<bool>,
    file_selection: Option<bool>,
    naming: Option<bool>,
    favorites: Option<bool>,
}

impl Config {
    /// Defaults, then the user config file, then the workspace config file
    pub fn load(workspace: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::user_config_path() {
            config.apply_if_exists(&path)?;
        }
        if let Some(workspace) = workspace {
            config.apply_if_exists(&Self::workspace_config_path(workspace))?;
        }

        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::default();
        config.apply(&read_config_file(path.as_ref())?);
        Ok(config)
    }

    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILENAME))
    }

    pub fn workspace_config_path(workspace: &Path) -> PathBuf {
        workspace.join(SETTINGS_DIR).join(WORKSPACE_CONFIG_FILENAME)
    }

    fn apply_if_exists(&mut self, path: &Path) -> Result<()> {
        if path.exists() {
            self.apply(&read_config_file(path)?);
        }
        Ok(())
    }

    fn apply(&mut self, file: &ConfigFile) {
        if let Some(value) = file.git_branch_scoping {
            self.git_branch_scoping = value;
        }
        if let Some(value) = file.file_selection {
            self.file_selection = value;
        }
        if let Some(value) = file.naming {
            self.naming = value;
        }
        if let Some(value) = file.favorites {
            self.favorites = value;
        }
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let path = path.to_path_buf();
    let raw = fs::read_to_string(&path).map_err(|source| TabHeroError::ConfigIo {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| TabHeroError::ConfigParse { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::time::{SystemTime, UNIX_EPOCH};

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new() -> Self {
            let mut path = std::env::temp_dir();
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time went backwards")
                .as_nanos();
            path.push(format!(
                "tabhero-config-test-{:?}-{timestamp}",
                std::thread::current().id()
            ));
            fs::create_dir_all(path.join(SETTINGS_DIR)).expect("create temp dir");
            Self { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    fn write_config(path: &Path, contents: &str) {
        let mut file = File::create(path).expect("create config file");
        write!(file, "{contents}").expect("write config");
    }

    #[test]
    fn defaults_enable_everything() {
        let config = Config::default();
        assert!(config.git_branch_scoping);
        assert!(config.file_selection);
        assert!(config.naming);
        assert!(config.favorites);
    }

    #[test]
    fn load_from_file_overrides_only_given_keys() {
        let temp = TestDir::new();
        let path = temp.path().join("custom.toml");
        write_config(&path, "naming = false\nfavorites = false\n");

        let config = Config::load_from_file(&path).expect("load config");
        assert!(config.git_branch_scoping);
        assert!(config.file_selection);
        assert!(!config.naming);
        assert!(!config.favorites);
    }

    #[test]
    fn workspace_file_is_layered_over_defaults() {
        let temp = TestDir::new();
        write_config(
            &Config::workspace_config_path(temp.path()),
            "git-branch-scoping = false\n",
        );

        let mut config = Config::default();
        config
            .apply_if_exists(&Config::workspace_config_path(temp.path()))
            .expect("apply workspace config");
        assert!(!config.git_branch_scoping);
        assert!(config.naming);
    }

    #[test]
    fn missing_file_is_skipped() {
        let temp = TestDir::new();
        let mut config = Config::default();
        config
            .apply_if_exists(&temp.path().join("nope.toml"))
            .expect("missing file is fine");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_toml_is_reported() {
        let temp = TestDir::new();
        let path = temp.path().join("broken.toml");
        write_config(&path, "naming = maybe");

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, TabHeroError::ConfigParse { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp = TestDir::new();
        let path = temp.path().join("typo.toml");
        write_config(&path, "favourites = true");

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, TabHeroError::ConfigParse { .. }));
    }
}
