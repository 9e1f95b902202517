use crate::Result;
use crate::activity::{AggregatorOptions, MAX_COMMITS_PER_REPOSITORY, MAX_REPOSITORIES};
use crate::github::DEFAULT_API_URL;
use crate::theme::{PartialTheme, ThemeResolver, builtin_presets};
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;

const LOG_TARGET: &str = "    config";

const CONFIG_FILE_NAMES: [&str; 4] = ["typecard.toml", "typecard.yml", "typecard.yaml", "typecard.json"];

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_repository_timeout_secs() -> u64 {
    10
}

const fn default_max_repositories() -> usize {
    MAX_REPOSITORIES
}

const fn default_commits_per_repository() -> usize {
    MAX_COMMITS_PER_REPOSITORY
}

fn default_user_agent() -> String {
    "typecard".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the GitHub API, for GitHub Enterprise installations.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Timeout for a single HTTP call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Time allowed for fetching one repository's commits, in seconds.
    #[serde(default = "default_repository_timeout_secs")]
    pub repository_timeout_secs: u64,

    /// How many recently updated repositories to sample. Values above 10 are clamped.
    #[serde(default = "default_max_repositories")]
    pub max_repositories: usize,

    /// How many commits to read from each repository. Values above 100 are clamped.
    #[serde(default = "default_commits_per_repository")]
    pub commits_per_repository: usize,

    /// Fail a request when any single repository cannot be read.
    #[serde(default)]
    pub fail_on_partial_failure: bool,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Extra theme presets, selectable with `tq=<name>`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub themes: BTreeMap<String, PartialTheme>,
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, the first of `typecard.toml`, `typecard.yml`, `typecard.yaml`
    /// and `typecard.json` found in `base_dir` is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading typecard configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let mut found = None;
            for path in CONFIG_FILE_NAMES.iter().map(|name| base_dir.join(name)) {
                match fs::read_to_string(&path) {
                    Ok(text) => {
                        found = Some((path, text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading typecard configuration from {path}")),
                }
            }

            let Some(result) = found else {
                log::debug!(target: LOG_TARGET, "No configuration file in '{base_dir}', using defaults");
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        log::debug!(target: LOG_TARGET, "Loading configuration from '{final_path}'");

        let config = Self::parse(&final_path, &text)?;
        let warnings = config.validate();
        Ok((config, warnings))
    }

    /// Parse configuration text, choosing the format from the extension of `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is unsupported or the text is malformed
    pub fn parse(path: &Utf8Path, text: &str) -> Result<Self> {
        let extension = path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(text).into_app_err_with(|| format!("parsing TOML configuration from {path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(text).into_app_err_with(|| format!("parsing YAML configuration from {path}"))?,
            "json" => serde_json::from_str(text).into_app_err_with(|| format!("parsing JSON configuration from {path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?,
            "yml" | "yaml" => serde_yaml::to_string(self)
                .into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }

    /// Collect human-readable warnings about values that will be adjusted or look suspicious.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.max_repositories > MAX_REPOSITORIES {
            warnings.push(format!(
                "max_repositories = {} exceeds the limit and will be clamped to {MAX_REPOSITORIES}",
                self.max_repositories
            ));
        }

        if self.max_repositories == 0 {
            warnings.push("max_repositories = 0 means no repositories are sampled and every card will be empty".to_string());
        }

        if self.commits_per_repository > MAX_COMMITS_PER_REPOSITORY {
            warnings.push(format!(
                "commits_per_repository = {} exceeds the limit and will be clamped to {MAX_COMMITS_PER_REPOSITORY}",
                self.commits_per_repository
            ));
        }

        if self.commits_per_repository == 0 {
            warnings.push("commits_per_repository = 0 means no commits are read and every card will be empty".to_string());
        }

        if self.request_timeout_secs == 0 {
            warnings.push("request_timeout_secs = 0 makes every HTTP call time out immediately".to_string());
        }

        if self.repository_timeout_secs == 0 {
            warnings.push("repository_timeout_secs = 0 makes every repository query time out immediately".to_string());
        }

        if let Err(e) = url::Url::parse(&self.api_url) {
            warnings.push(format!("api_url '{}' is not a valid URL: {e}", self.api_url));
        }

        let builtins = builtin_presets();
        for (key, theme) in &self.themes {
            let normalized = key.trim().to_ascii_lowercase();
            if builtins.contains_key(&normalized) {
                warnings.push(format!("theme '{key}' shadows the built-in preset of the same name"));
            }
            if theme.is_empty() {
                warnings.push(format!("theme '{key}' sets no fields and is identical to the default theme"));
            }
        }

        warnings
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn aggregator_options(&self) -> AggregatorOptions {
        AggregatorOptions {
            max_repositories: self.max_repositories,
            commits_per_repository: self.commits_per_repository,
            repository_timeout: Duration::from_secs(self.repository_timeout_secs),
            fail_on_partial_failure: self.fail_on_partial_failure,
        }
    }

    /// Built-in presets plus the ones declared in this configuration.
    #[must_use]
    pub fn theme_resolver(&self) -> ThemeResolver {
        ThemeResolver::with_presets(self.themes.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            repository_timeout_secs: default_repository_timeout_secs(),
            max_repositories: default_max_repositories(),
            commits_per_repository: default_commits_per_repository(),
            fail_on_partial_failure: false,
            user_agent: default_user_agent(),
            themes: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Color;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_empty());

        let options = config.aggregator_options();
        assert_eq!(options.max_repositories, 10);
        assert_eq!(options.commits_per_repository, 100);
        assert_eq!(options.repository_timeout, Duration::from_secs(10));
        assert!(!options.fail_on_partial_failure);
    }

    #[test]
    fn test_parse_toml_with_theme() {
        let text = r##"
            max_repositories = 5

            [themes.corporate]
            title = "#112233"
            title_size = 22
        "##;

        let config = Config::parse(Utf8Path::new("typecard.toml"), text).unwrap();
        assert_eq!(config.max_repositories, 5);
        assert_eq!(config.commits_per_repository, 100);

        let theme = &config.themes["corporate"];
        assert_eq!(theme.title, Some(Color::from_hex(0x11_22_33)));
        assert_eq!(theme.title_size, Some(22));

        let resolved = config.theme_resolver().resolve(Some("corporate"), &PartialTheme::default());
        assert_eq!(resolved.text.title.size, 22);
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let _ = Config::parse(Utf8Path::new("typecard.toml"), "colour = 1").unwrap_err();
        let _ = Config::parse(Utf8Path::new("typecard.json"), r#"{"themes": {"x": {"shade": "red"}}}"#).unwrap_err();
    }

    #[test]
    fn test_parse_rejects_unknown_extension() {
        let _ = Config::parse(Utf8Path::new("typecard.ini"), "").unwrap_err();
    }

    #[test]
    fn test_validate_warnings() {
        let mut config = Config {
            max_repositories: 50,
            commits_per_repository: 0,
            repository_timeout_secs: 0,
            ..Config::default()
        };
        let _ = config.themes.insert("Dark".to_string(), PartialTheme::default());

        let warnings = config.validate();
        assert_eq!(warnings.len(), 5, "{warnings:?}");
        assert!(warnings.iter().any(|w| w.contains("clamped to 10")));
        assert!(warnings.iter().any(|w| w.contains("shadows")));
    }
}
