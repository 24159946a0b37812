use crate::core::render::DEFAULT_PLACEHOLDER;
use crate::errors::{AppError, AppResult};
use crate::models::FieldMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub features: Features,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub domain: Domain,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    /// Track pin state for every record.
    #[serde(default = "default_true")]
    pub pinning: bool,
    #[serde(default = "default_true")]
    pub show_minor_events: bool,
    #[serde(default = "default_true")]
    pub stats: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_accent")]
    pub accent: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// Namespaces persisted state (pinned events) per dataset.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub field_map: FieldMap,
    /// Display label overrides, keyed by logical field name.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub data_url: Option<String>,
    #[serde(default = "default_throttle_ms")]
    pub activity_throttle_ms: u64,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_true() -> bool {
    true
}
fn default_accent() -> String {
    "cyan".to_string()
}
fn default_throttle_ms() -> u64 {
    250
}
fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

impl Default for Features {
    fn default() -> Self {
        Self {
            pinning: true,
            show_minor_events: true,
            stats: true,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            color: true,
            accent: default_accent(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_url: None,
            activity_throttle_ms: default_throttle_ms(),
            placeholder: default_placeholder(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            features: Features::default(),
            theme: Theme::default(),
            domain: Domain::default(),
            settings: Settings::default(),
        }
    }
}

impl Domain {
    /// Display label for a logical field, honouring overrides.
    pub fn label<'a>(&'a self, field: &'a str) -> &'a str {
        self.labels.get(field).map(String::as_str).unwrap_or(field)
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rtimeline")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimeline.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtimeline.sqlite")
    }

    /// Load configuration from `path` (or the default location).
    /// A missing file yields defaults; an unreadable or invalid one is fatal.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_file);

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            log::error!("cannot read {}: {e}", path.display());
            AppError::ConfigLoad
        })?;
        let cfg = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    /// Write the default configuration to `path` and create the database
    /// directory. Returns the resulting configuration.
    pub fn init_all(path: Option<&Path>, custom_db: Option<String>) -> AppResult<Self> {
        let conf_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_file);
        if let Some(dir) = conf_path.parent() {
            fs::create_dir_all(dir)?;
        }

        let mut config = Config::default();
        if let Some(db) = custom_db {
            config.database = db;
        }
        if let Some(dir) = Path::new(&config.database).parent() {
            fs::create_dir_all(dir)?;
        }

        let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(&conf_path)?;
        file.write_all(yaml.as_bytes())?;

        Ok(config)
    }
}
