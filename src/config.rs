use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://www.alleyinteractive.com/wp-json/wp/v2";
const DEFAULT_CACHE_TTL_SECS: u64 = 10;
const MAX_CACHE_TTL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub remote: RemoteConfig,
  #[serde(default)]
  pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
  /// Root of the REST API; posts are looked up at `{base_url}/posts`
  #[serde(default = "default_base_url")]
  pub base_url: String,
  /// Request timeout. Unset means the HTTP client's own default.
  pub timeout_secs: Option<u64>,
}

impl Default for RemoteConfig {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
      timeout_secs: None,
    }
  }
}

fn default_base_url() -> String {
  DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
  /// When false, synthesized posts are not written to the object cache
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// How long a synthesized post stays resolvable by id
  #[serde(default = "default_cache_ttl")]
  pub ttl_secs: u64,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      ttl_secs: DEFAULT_CACHE_TTL_SECS,
    }
  }
}

fn default_true() -> bool {
  true
}

fn default_cache_ttl() -> u64 {
  DEFAULT_CACHE_TTL_SECS
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./remote-posts.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/remote-posts/config.yaml
  ///
  /// Without a file the built-in defaults are used. `REMOTE_POSTS_BASE_URL`
  /// overrides `remote.base_url` either way.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Self::default(),
    };

    let config = match Self::base_url_from_env() {
      Some(url) => config.with_base_url(url),
      None => config,
    };

    config.validate()?;
    Ok(config)
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("remote-posts.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("remote-posts").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  /// Parse a YAML document. An empty document yields the defaults.
  pub fn from_yaml_str(contents: &str) -> Result<Self> {
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }

    serde_yaml::from_str(contents).map_err(|e| eyre!("{}", e))
  }

  fn base_url_from_env() -> Option<String> {
    std::env::var("REMOTE_POSTS_BASE_URL")
      .ok()
      .filter(|url| !url.trim().is_empty())
  }

  pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
    Self {
      remote: RemoteConfig {
        base_url: base_url.into(),
        ..self.remote
      },
      ..self
    }
  }

  /// Check the settings that would otherwise only fail on first use.
  pub fn validate(&self) -> Result<()> {
    self.posts_endpoint().map(|_| ())
  }

  /// Absolute URL of the posts collection.
  pub fn posts_endpoint(&self) -> Result<Url> {
    let mut base = Url::parse(self.remote.base_url.trim())
      .map_err(|e| eyre!("Invalid remote base_url {:?}: {}", self.remote.base_url, e))?;

    if !matches!(base.scheme(), "http" | "https") {
      return Err(eyre!(
        "Remote base_url must be http or https, got {:?}",
        self.remote.base_url
      ));
    }

    // Url::join replaces the last segment unless the path ends in a slash
    if !base.path().ends_with('/') {
      let path = format!("{}/", base.path());
      base.set_path(&path);
    }

    base
      .join("posts")
      .map_err(|e| eyre!("Invalid remote base_url {:?}: {}", self.remote.base_url, e))
  }

  pub fn cache_ttl(&self) -> chrono::Duration {
    // Bounded so the chrono conversion cannot overflow
    let secs = self.cache.ttl_secs.min(MAX_CACHE_TTL_SECS);
    chrono::Duration::seconds(secs as i64)
  }

  pub fn timeout(&self) -> Option<std::time::Duration> {
    self.remote.timeout_secs.map(std::time::Duration::from_secs)
  }
}
