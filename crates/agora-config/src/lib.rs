//! Configuration management for Agora.
//!
//! Parses `agora.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `storage.upload_url`
//! - `storage.base_url`
//! - `images.gravatar_url`
//! - `images.default_category_image`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override theme root directory.
    pub theme_root: Option<PathBuf>,
    /// Override public uploads path.
    pub upload_url: Option<String>,
    /// Override uploads host.
    pub storage_base_url: Option<String>,
    /// Override `<pre>` class.
    pub code_class: Option<String>,
    /// Override video embedding.
    pub video_embeds: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "agora.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SEO link configuration.
    pub seo: SeoConfig,
    /// Post rendering configuration.
    pub content: ContentConfig,
    /// Upload storage configuration.
    pub storage: StorageConfig,
    /// Avatar and category image configuration.
    pub images: ImagesConfig,
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// SEO link configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SeoConfig {
    /// Query parameter holding the current page number.
    pub page_param: String,
    /// Page URL template with `{url}` and `{page}` placeholders.
    ///
    /// Derived from `page_param` when unset.
    pub paging_url_format: Option<String>,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            page_param: "p".to_owned(),
            paging_url_format: None,
        }
    }
}

impl SeoConfig {
    /// Effective page URL template.
    ///
    /// ```
    /// let seo = agora_config::SeoConfig {
    ///     page_param: "page".to_owned(),
    ///     paging_url_format: None,
    /// };
    /// assert_eq!(seo.paging_url_format(), "{url}?page={page}");
    /// ```
    pub fn paging_url_format(&self) -> String {
        match &self.paging_url_format {
            Some(format) => format.clone(),
            None => format!("{{url}}?{}={{page}}", self.page_param),
        }
    }
}

/// Name of the query parameter a template puts the page number in, if any.
fn template_query_param(template: &str) -> Option<&str> {
    let head = template.split_once("={page}")?.0;
    let start = head.rfind(['?', '&'])? + 1;
    Some(&head[start..])
}

/// Post rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Class added to `<pre>` blocks for client-side highlighting.
    pub code_class: String,
    /// Whether video links become inline players.
    pub video_embeds: bool,
    /// Whether GitHub Flavored Markdown extensions are enabled.
    pub gfm: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            code_class: "prettyprint".to_owned(),
            video_embeds: true,
            gfm: true,
        }
    }
}

/// Upload storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Public path of the uploads folder.
    pub upload_url: String,
    /// Absolute host serving uploads (e.g., a CDN).
    pub base_url: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_url: "/content/uploads".to_owned(),
            base_url: None,
        }
    }
}

/// Avatar and category image configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Gravatar endpoint.
    pub gravatar_url: String,
    /// Gravatar default image style (`d` parameter).
    pub gravatar_default: String,
    /// Gravatar maximum rating (`r` parameter).
    pub gravatar_rating: String,
    /// Image for categories without an upload. No image when unset.
    pub default_category_image: Option<String>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            gravatar_url: "https://www.gravatar.com/avatar".to_owned(),
            gravatar_default: "identicon".to_owned(),
            gravatar_rating: "pg".to_owned(),
            default_category_image: None,
        }
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    theme_root: Option<String>,
    category_url_identifier: Option<String>,
    badge_root: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Directory containing installed themes.
    pub theme_root: PathBuf,
    /// First path segment of category URLs.
    pub category_url_identifier: String,
    /// Public path of badge images.
    pub badge_root: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`storage.base_url`").
        field: String,
        /// Error message (e.g., "${`CDN_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `agora.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the result (including CLI overrides) is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(theme_root) = &settings.theme_root {
            self.site_resolved.theme_root.clone_from(theme_root);
        }
        if let Some(upload_url) = &settings.upload_url {
            self.storage.upload_url.clone_from(upload_url);
        }
        if let Some(base_url) = &settings.storage_base_url {
            self.storage.base_url = Some(base_url.clone());
        }
        if let Some(code_class) = &settings.code_class {
            self.content.code_class.clone_from(code_class);
        }
        if let Some(video_embeds) = settings.video_embeds {
            self.content.video_embeds = video_embeds;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            seo: SeoConfig::default(),
            content: ContentConfig::default(),
            storage: StorageConfig::default(),
            images: ImagesConfig::default(),
            site: SiteConfigRaw::default(),
            site_resolved: SiteConfig {
                theme_root: base.join("themes"),
                category_url_identifier: "cat".to_owned(),
                badge_root: "/content/badges".to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_seo()?;
        self.validate_content()?;
        self.validate_storage()?;
        self.validate_images()?;
        require_non_empty(
            &self.site_resolved.category_url_identifier,
            "site.category_url_identifier",
        )?;
        Ok(())
    }

    fn validate_seo(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.seo.page_param, "seo.page_param")?;
        let Some(format) = &self.seo.paging_url_format else {
            return Ok(());
        };
        if !format.contains("{url}") || !format.contains("{page}") {
            return Err(ConfigError::Validation(
                "seo.paging_url_format must contain {url} and {page}".to_owned(),
            ));
        }
        if let Some(param) = template_query_param(format)
            && param != self.seo.page_param
        {
            return Err(ConfigError::Validation(format!(
                "seo.paging_url_format puts the page in {param:?} but seo.page_param is {:?}",
                self.seo.page_param
            )));
        }
        Ok(())
    }

    fn validate_content(&self) -> Result<(), ConfigError> {
        // Allowed characters are checked by the `<pre>` class stage itself.
        require_non_empty(&self.content.code_class, "content.code_class")
    }

    fn validate_storage(&self) -> Result<(), ConfigError> {
        require_non_empty(self.storage.upload_url.trim_end_matches('/'), "storage.upload_url")?;
        if let Some(ref base_url) = self.storage.base_url {
            require_http_url(base_url, "storage.base_url")?;
        }
        Ok(())
    }

    fn validate_images(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.images.gravatar_url, "images.gravatar_url")?;
        require_http_url(&self.images.gravatar_url, "images.gravatar_url")?;
        require_non_empty(&self.images.gravatar_default, "images.gravatar_default")?;
        require_non_empty(&self.images.gravatar_rating, "images.gravatar_rating")?;
        if let Some(ref image) = self.images.default_category_image {
            require_non_empty(image, "images.default_category_image")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.storage.upload_url =
            expand::expand_env(&self.storage.upload_url, "storage.upload_url")?;
        if let Some(ref url) = self.storage.base_url {
            self.storage.base_url = Some(expand::expand_env(url, "storage.base_url")?);
        }

        self.images.gravatar_url =
            expand::expand_env(&self.images.gravatar_url, "images.gravatar_url")?;
        if let Some(ref image) = self.images.default_category_image {
            self.images.default_category_image =
                Some(expand::expand_env(image, "images.default_category_image")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory and fill defaults.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.site_resolved = SiteConfig {
            theme_root: config_dir.join(self.site.theme_root.as_deref().unwrap_or("themes")),
            category_url_identifier: self
                .site
                .category_url_identifier
                .clone()
                .unwrap_or_else(|| "cat".to_owned()),
            badge_root: self
                .site
                .badge_root
                .clone()
                .unwrap_or_else(|| "/content/badges".to_owned()),
        };
    }
}
