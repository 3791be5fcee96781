// config.rs — Server configuration.
//
// ServerConfig is read from `goalboard.toml` when the file exists. Every
// key has a default, so an empty or missing file gives a working server
// on port 3000 serving `public/`. The `PORT` environment variable and
// command-line flags override the file, in that order. ServeArgs carries
// those flags for both `gb-daemon` and `gb serve`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::{Deserialize, Serialize};

use gb_goal::{default_seed, Goal, GoalId};

use crate::error::ConfigError;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "goalboard.toml";

/// Configuration for the goalboard daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding `index.html` and the front-end scripts.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Message returned by `GET /api/greet`.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Optional JSONL file receiving one line per goal mutation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_log: Option<PathBuf>,

    /// Goals the store starts with.
    #[serde(default = "default_seed")]
    pub seed: Vec<Goal>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            greeting: default_greeting(),
            events_log: None,
            seed: default_seed(),
        }
    }
}

// Serde default functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_greeting() -> String {
    "Hello from goalboard API!".to_string()
}

impl ServerConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&content)?;
        config.check_seed()?;
        Ok(config)
    }

    /// Seed ids must be distinct and leave room for the id counter.
    pub fn check_seed(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for goal in &self.seed {
            if goal.id == GoalId::MAX {
                return Err(ConfigError::InvalidSeed(format!(
                    "id {} leaves no ids for new goals",
                    goal.id
                )));
            }
            if !seen.insert(goal.id) {
                return Err(ConfigError::InvalidSeed(format!(
                    "id {} appears more than once",
                    goal.id
                )));
            }
        }
        Ok(())
    }

    /// Load config if the file exists, defaults otherwise. A file that
    /// exists but doesn't parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply the `PORT` environment variable, if set.
    pub fn with_env(mut self) -> Self {
        self.override_port(std::env::var("PORT").ok().as_deref());
        self
    }

    /// Replace the port with `value` when it parses as a port number.
    pub fn override_port(&mut self, value: Option<&str>) {
        let Some(raw) = value else {
            return;
        };
        match raw.trim().parse::<u16>() {
            Ok(port) => self.port = port,
            Err(_) => tracing::warn!("ignoring invalid PORT value {:?}", raw),
        }
    }
}

/// Server flags shared by `gb-daemon` and `gb serve`.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Path to the config file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Interface to bind (overrides config).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides config and PORT).
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory with the front-end files (overrides config).
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

impl ServeArgs {
    /// Resolve file, then `PORT`, then these flags into one config.
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = ServerConfig::load_or_default(&self.config)?.with_env();
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = self.static_dir {
            config.static_dir = dir;
        }
        Ok(config)
    }
}
