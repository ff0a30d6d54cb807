use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Action-type marker identifying a "song played" record in the logs.
pub const DEFAULT_PLAY_ACTION: &str = "NextSong";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    pub song_data: String,
    pub log_data: String,
    #[serde(default = "default_play_action")]
    pub play_action: String,
}

fn default_play_action() -> String {
    DEFAULT_PLAY_ACTION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            song_data: "data/song_data".to_string(),
            log_data: "data/log_data".to_string(),
            play_action: default_play_action(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("playmart")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".playmart")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("playmart.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("playmart.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content).map_err(|_| AppError::ConfigLoad)
        } else {
            Ok(Config::default())
        }
    }

    /// Persist the current configuration to the config file.
    pub fn save(&self) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration and database files.
    /// In test mode the config file is not touched, only the database.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        if !is_test {
            fs::create_dir_all(&dir)?;
        }

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            config.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            if let Some(parent) = db_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }

    /// Report configuration problems (missing paths, empty fields).
    /// Returns the list of findings; an empty list means the config is sound.
    pub fn check(&self) -> Vec<String> {
        let mut findings = Vec::new();

        if self.database.trim().is_empty() {
            findings.push("`database` is empty".to_string());
        }
        if self.play_action.trim().is_empty() {
            findings.push("`play_action` is empty".to_string());
        }
        for (name, value) in [("song_data", &self.song_data), ("log_data", &self.log_data)] {
            if value.trim().is_empty() {
                findings.push(format!("`{}` is empty", name));
            } else if !crate::utils::path::expand_tilde(value).is_dir() {
                findings.push(format!("`{}` does not point to a directory: {}", name, value));
            }
        }

        findings
    }
}
