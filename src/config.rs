//! Configuration file structures for the nihao bot.
//!
//! This module defines the configuration file format using YAML. The file holds
//! a single `plugin` section with the welcome-plugin settings; every key is
//! optional and falls back to a default.
//!
//! # Configuration File Format
//!
//! ```yaml
//! plugin:
//!   # Whether to greet new group members at all
//!   is_send_welcome: true
//!
//!   # Whether to @-mention the joining member before the greeting
//!   is_at: true
//!
//!   # The greeting sent to new members
//!   welcome_text: "欢迎新成员加入！"
//!
//!   # Groups that receive join greetings
//!   welcome_groups: ["123456"]
//!
//!   # Groups whose messages are scanned for admin commands
//!   monitor_groups: ["654321"]
//! ```
//!
//! # Environment Variable Overrides
//!
//! Any value can be overridden with a `NIHAO_` prefixed environment variable,
//! using `__` as the section separator:
//!
//! ```bash
//! export NIHAO_PLUGIN__WELCOME_TEXT="欢迎！"
//! export NIHAO_PLUGIN__IS_AT=false
//! ```

use std::collections::HashSet;

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

/// Root configuration structure for the nihao bot.
///
/// Loaded once at startup from a YAML file with environment variable
/// overrides. The only section is [`WelcomeConfig`]; the values it provides
/// are the *initial* plugin settings — once an admin command mutates the
/// whitelist, the persisted snapshot in the data directory takes precedence
/// on the next start (see [`crate::store::FileConfigStore`]).
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Welcome plugin settings.
    #[serde(default)]
    pub plugin: WelcomeConfig,
}

impl Config {
    /// Loads the configuration from a YAML file, applying `NIHAO_` prefixed
    /// environment variable overrides.
    ///
    /// A missing file is not an error: every key has a default, so an empty
    /// configuration is valid.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file exists but is not valid YAML,
    /// or if a value cannot be deserialized into its expected type.
    pub fn load(path: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("NIHAO_").split("__"))
            .extract()
    }
}

/// The welcome plugin configuration snapshot.
///
/// This is the single piece of state the plugin owns. It is created once at
/// startup (from the config file or a persisted snapshot) and mutated only by
/// the `add_group` / `remove_group` admin commands, each mutation being
/// flushed through [`crate::store::ConfigStore::save`] before the command is
/// acknowledged.
///
/// # Invariants
///
/// - `welcome_groups` contains no duplicate group ids. The add/remove actions
///   validate membership before mutating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WelcomeConfig {
    /// Whether join greetings are sent at all.
    #[serde(default = "default_is_send_welcome")]
    pub is_send_welcome: bool,

    /// Whether the joining member is @-mentioned before the greeting.
    #[serde(default = "default_is_at")]
    pub is_at: bool,

    /// The greeting text sent to new members.
    #[serde(default = "default_welcome_text")]
    pub welcome_text: String,

    /// Group ids eligible to receive join greetings, in insertion order.
    #[serde(default)]
    pub welcome_groups: Vec<String>,

    /// Group ids whose text messages are scanned for admin commands.
    #[serde(default)]
    pub monitor_groups: HashSet<String>,
}

impl Default for WelcomeConfig {
    fn default() -> Self {
        WelcomeConfig {
            is_send_welcome: default_is_send_welcome(),
            is_at: default_is_at(),
            welcome_text: default_welcome_text(),
            welcome_groups: Vec::new(),
            monitor_groups: HashSet::new(),
        }
    }
}

fn default_is_send_welcome() -> bool {
    true
}

fn default_is_at() -> bool {
    true
}

fn default_welcome_text() -> String {
    "欢迎新成员加入！".to_owned()
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn test_welcome_config_defaults() {
        let config = WelcomeConfig::default();
        assert!(config.is_send_welcome);
        assert!(config.is_at);
        assert_eq!(config.welcome_text, "欢迎新成员加入！");
        assert!(config.welcome_groups.is_empty());
        assert!(config.monitor_groups.is_empty());
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: WelcomeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, WelcomeConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config: WelcomeConfig =
            serde_json::from_str(r#"{"is_at": false, "welcome_groups": ["100"]}"#).unwrap();
        assert!(config.is_send_welcome);
        assert!(!config.is_at);
        assert_eq!(config.welcome_groups, vec!["100".to_owned()]);
        assert!(config.monitor_groups.is_empty());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = WelcomeConfig {
            is_send_welcome: false,
            is_at: true,
            welcome_text: "hello".to_owned(),
            welcome_groups: vec!["1".to_owned(), "2".to_owned()],
            monitor_groups: HashSet::from(["3".to_owned()]),
        };
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: WelcomeConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    #[serial]
    fn test_load_yaml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
                plugin:
                  is_send_welcome: false
                  welcome_text: "你好"
                  welcome_groups: ["100", "200"]
                  monitor_groups: ["300"]
                "#,
            )?;

            let config = Config::load("config.yaml")?;
            assert!(!config.plugin.is_send_welcome);
            // Unset keys keep their defaults
            assert!(config.plugin.is_at);
            assert_eq!(config.plugin.welcome_text, "你好");
            assert_eq!(
                config.plugin.welcome_groups,
                vec!["100".to_owned(), "200".to_owned()]
            );
            assert!(config.plugin.monitor_groups.contains("300"));
            Ok(())
        });
    }

    #[test]
    #[serial]
    fn test_load_missing_file_uses_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load("does-not-exist.yaml")?;
            assert_eq!(config.plugin, WelcomeConfig::default());
            Ok(())
        });
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r#"
                plugin:
                  welcome_text: "from file"
                "#,
            )?;
            jail.set_env("NIHAO_PLUGIN__WELCOME_TEXT", "from env");
            jail.set_env("NIHAO_PLUGIN__IS_AT", "false");

            let config = Config::load("config.yaml")?;
            assert_eq!(config.plugin.welcome_text, "from env");
            assert!(!config.plugin.is_at);
            Ok(())
        });
    }
}
