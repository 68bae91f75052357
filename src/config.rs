//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/tmtree/tmtree.toml`
//! 3. Local config: `<dir>/.tmtree.toml`
//! 4. Environment variables: `TMTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, DEFAULT_STEP};
use crate::domain::Rect;
use crate::util::path::expand_path;

/// Unified configuration for tmtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Screen width the root is laid out into
    pub width: i32,
    /// Screen height the root is laid out into
    pub height: i32,
    /// Relative grow/shrink step
    pub step: f64,
    /// Group papers by publication year first
    pub by_year: bool,
    /// Name of the root node of paper trees
    pub papers_root: String,
    /// Default paper dataset
    pub papers_file: PathBuf,
    /// Colour seed; random per run when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            step: DEFAULT_STEP,
            by_year: true,
            papers_root: "CS1".into(),
            papers_file: PathBuf::from("cs1_papers.csv"),
            seed: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub step: Option<f64>,
    pub by_year: Option<bool>,
    pub papers_root: Option<String>,
    pub papers_file: Option<PathBuf>,
    pub seed: Option<u64>,
}

/// Get the XDG config directory for tmtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tmtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("tmtree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".tmtree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Screen rectangle anchored at the origin.
    pub fn screen(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Overlay: values present in `raw` win, everything else is kept.
    pub fn merge_with(&self, raw: &RawSettings) -> Self {
        Self {
            width: raw.width.unwrap_or(self.width),
            height: raw.height.unwrap_or(self.height),
            step: raw.step.unwrap_or(self.step),
            by_year: raw.by_year.unwrap_or(self.by_year),
            papers_root: raw
                .papers_root
                .clone()
                .unwrap_or_else(|| self.papers_root.clone()),
            papers_file: raw
                .papers_file
                .clone()
                .unwrap_or_else(|| self.papers_file.clone()),
            seed: raw.seed.or(self.seed),
        }
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.papers_file = expand_path(&self.papers_file);
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.tmtree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        current.validate()?;
        Ok(current)
    }

    /// Apply TMTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TMTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<i32>("width") {
            settings.width = val;
        }
        if let Ok(val) = config.get::<i32>("height") {
            settings.height = val;
        }
        if let Ok(val) = config.get_float("step") {
            settings.step = val;
        }
        if let Ok(val) = config.get_bool("by_year") {
            settings.by_year = val;
        }
        if let Ok(val) = config.get_string("papers_root") {
            settings.papers_root = val;
        }
        if let Ok(val) = config.get_string("papers_file") {
            settings.papers_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get::<u64>("seed") {
            settings.seed = Some(val);
        }

        Ok(settings)
    }

    /// Reject settings the layout cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ApplicationError::Config {
                message: format!("screen must be positive, got {}x{}", self.width, self.height),
            });
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(ApplicationError::Config {
                message: format!("step must be a positive number, got {}", self.step),
            });
        }
        Ok(())
    }

    /// Serialize settings to TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize: {}", e),
        })
    }

    /// Commented template for `config init`.
    pub fn template() -> String {
        r#"# tmtree configuration
# Global: ~/.config/tmtree/tmtree.toml, local: ./.tmtree.toml
# Environment overrides: TMTREE_WIDTH, TMTREE_SEED, ...

# Screen the treemap is laid out into
width = 1024
height = 768

# Relative grow/shrink step
step = 0.01

# Paper datasets: group by year, root name, default file
by_year = true
papers_root = "CS1"
papers_file = "cs1_papers.csv"

# Fixed colour seed (omit for random colours)
# seed = 42
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
