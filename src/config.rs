use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{
    error::{Error, Result},
    session::{Mode, SessionConfig},
    window::Window,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub words_per_line: usize,
    pub lines_per_page: usize,
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub duration_secs: u64,
    /// Fixed-length test instead of a timed one
    pub word_count: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            words_per_line: 8,
            lines_per_page: 3,
            min_word_length: 2,
            max_word_length: 8,
            duration_secs: 30,
            word_count: None,
        }
    }
}

impl Config {
    pub fn mode(&self) -> Mode {
        match self.word_count {
            Some(count) => Mode::Words(count),
            None => Mode::Timed(Duration::from_secs(self.duration_secs)),
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            window: Window::new(self.words_per_line, self.lines_per_page),
            mode: self.mode(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_word_length == 0 || self.min_word_length > self.max_word_length {
            return Err(Error::InvalidBounds {
                min: self.min_word_length,
                max: self.max_word_length,
            });
        }
        self.session_config().validate()
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "stronglytyped") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("stronglytyped_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("ignoring unreadable config {}: {err}", self.path.display());
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
