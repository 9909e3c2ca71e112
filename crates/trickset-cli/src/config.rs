use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;
use trickset_core::engine::MAX_DECKS;
use trickset_core::store::DEFAULT_STORE_FILE;

pub const DEFAULT_CONFIG_FILE: &str = "tricksets.yaml";
const DEFAULT_DECKS: u32 = 6;

/// Root configuration loaded from YAML. Every field is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TricksetsConfig {
    /// File the values were read from; `None` for built-in defaults.
    #[serde(skip)]
    pub origin: Option<PathBuf>,
    #[serde(default = "default_decks")]
    pub decks: u32,
    #[serde(default = "default_store")]
    pub store: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TricksetsConfig {
    fn default() -> Self {
        Self {
            origin: None,
            decks: DEFAULT_DECKS,
            store: default_store(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TricksetsConfig {
    /// Load configuration from a YAML file on disk. Values are not checked
    /// until [`TricksetsConfig::validated`], so overrides can still fix them.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: TricksetsConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.origin = Some(path_buf);
        Ok(cfg)
    }

    /// Validate and attach the originating file to any failure.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        match self.validate() {
            Ok(()) => Ok(self),
            Err(source) => Err(ConfigError::Invalid {
                path: self.origin.take(),
                source,
            }),
        }
    }

    /// An explicit path must exist. Without one, `tricksets.yaml` in the
    /// working directory is used when present and defaults otherwise.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_path(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_path(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if self.decks == 0 {
            return Err(ValidationError::InvalidField {
                field: "decks".to_string(),
                message: "number of decks must be at least 1".to_string(),
            });
        }

        if self.decks > MAX_DECKS {
            return Err(ValidationError::InvalidField {
                field: "decks".to_string(),
                message: format!("number of decks must be at most {MAX_DECKS}"),
            });
        }

        if self.store.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "store".to_string(),
                message: "path must not be empty".to_string(),
            });
        }

        self.logging.validate()
    }

    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.store)
    }
}

fn default_decks() -> u32 {
    DEFAULT_DECKS
}

fn default_store() -> String {
    DEFAULT_STORE_FILE.to_string()
}

/// Logging goes to stderr unless `json_file` is set.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub json_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tracing_level: default_tracing_level(),
            json_file: None,
        }
    }
}

impl LoggingConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }
        if self
            .json_file
            .as_ref()
            .is_some_and(|path| path.trim().is_empty())
        {
            self.json_file = None;
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration{}: {source}", origin_suffix(.path))]
    Invalid {
        path: Option<PathBuf>,
        source: ValidationError,
    },
}

impl ConfigError {
    /// The config file involved, if the values came from one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => {
                Some(path.as_path())
            }
            ConfigError::Invalid { path, .. } => path.as_deref(),
        }
    }
}

fn origin_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {p:?}"))
        .unwrap_or_default()
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
