use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const CONFIG_FILE: &str = "snake.yaml";
pub const SCORE_KEY_ENV: &str = "SNAKE_SCORE_KEY";

/// Embedded fallback key for the high score file. Anyone with the binary can
/// read it; set `score_key` or `SNAKE_SCORE_KEY` to use a private one.
const DEFAULT_SCORE_KEY: &[u8; 32] = b"cegthctrm.hysqrk.xrjnjhsqytdjpvj";

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Ticks per second.
    pub speed_factor: u32,
    pub score_point_value: u32,
    pub initial_length: usize,
    pub stats_height: u16,
    pub score_file: PathBuf,
    pub log_file: PathBuf,
    pub max_listed_scores: usize,
    /// Random samples tried before food placement scans the whole board.
    pub food_attempts: usize,
    pub score_key: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            speed_factor: 8,
            score_point_value: 6,
            initial_length: 5,
            stats_height: 3,
            score_file: PathBuf::from("score.hsc"),
            log_file: PathBuf::from("log.txt"),
            max_listed_scores: 10,
            food_attempts: 64,
            score_key: None,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<(), String> {
        if self.speed_factor == 0 {
            return Err("speed_factor must be at least 1".to_string());
        }
        if self.score_point_value == 0 {
            return Err("score_point_value must be at least 1".to_string());
        }
        if self.score_point_value.checked_mul(self.speed_factor).is_none() {
            return Err("score_point_value * speed_factor does not fit in a score".to_string());
        }
        if self.initial_length == 0 {
            return Err("initial_length must be at least 1".to_string());
        }
        if self.stats_height > 5 {
            return Err("stats_height must be at most 5".to_string());
        }
        if self.max_listed_scores == 0 {
            return Err("max_listed_scores must be at least 1".to_string());
        }
        if self.food_attempts == 0 {
            return Err("food_attempts must be at least 1".to_string());
        }
        if let Some(key) = &self.score_key {
            if key.len() != DEFAULT_SCORE_KEY.len() {
                return Err(format!("score_key must be exactly 32 bytes, got {}", key.len()));
            }
        }
        Ok(())
    }
}

impl Settings {
    /// Reads settings from a YAML file. A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let settings = match std::fs::read_to_string(path) {
            Ok(content) => Self::from_yaml(&content)?,
            Err(err) if err.kind() == ErrorKind::NotFound => Settings::default(),
            Err(err) => return Err(GameError::Config(format!("Failed to read config file: {}", err))),
        };

        settings.validate().map_err(|e| GameError::Config(format!("Config validation error: {}", e)))?;
        Ok(settings)
    }

    pub fn from_yaml(content: &str) -> Result<Self, GameError> {
        serde_yaml_ng::from_str(content).map_err(|e| GameError::Config(format!("Failed to deserialize config: {}", e)))
    }

    /// Key for the high score cipher: environment first, then the config file,
    /// then the embedded default. A key of the wrong length is a config error.
    pub fn resolve_score_key(&self, env_key: Option<String>) -> Result<Vec<u8>, GameError> {
        if let Some(key) = env_key.filter(|k| !k.is_empty()) {
            return checked_key(key.into_bytes(), SCORE_KEY_ENV);
        }
        if let Some(key) = &self.score_key {
            return checked_key(key.clone().into_bytes(), "score_key");
        }

        warn!("Using the embedded high score key, set {} to use your own", SCORE_KEY_ENV);
        Ok(DEFAULT_SCORE_KEY.to_vec())
    }
}

fn checked_key(key: Vec<u8>, source: &str) -> Result<Vec<u8>, GameError> {
    if key.len() != DEFAULT_SCORE_KEY.len() {
        return Err(GameError::Config(format!(
            "{} must be exactly {} bytes, got {}",
            source,
            DEFAULT_SCORE_KEY.len(),
            key.len()
        )));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snake.yaml");
        std::fs::write(&path, "speed_factor: 12\nscore_file: scores.bin\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.speed_factor, 12);
        assert_eq!(settings.score_file, PathBuf::from("scores.bin"));
        assert_eq!(settings.score_point_value, 6);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snake.yaml");

        std::fs::write(&path, "speed_factor: 0\n").unwrap();
        assert!(matches!(Settings::load(&path), Err(GameError::Config(_))));

        std::fs::write(&path, "score_key: short\n").unwrap();
        assert!(matches!(Settings::load(&path), Err(GameError::Config(_))));

        std::fs::write(&path, "speed_factor: 1000\nscore_point_value: 4294968\n").unwrap();
        assert!(matches!(Settings::load(&path), Err(GameError::Config(_))));

        std::fs::write(&path, "colour: green\n").unwrap();
        assert!(matches!(Settings::load(&path), Err(GameError::Config(_))));
    }

    #[test]
    fn key_resolution_order() {
        let mut settings = Settings::default();
        assert_eq!(settings.resolve_score_key(None).unwrap(), DEFAULT_SCORE_KEY.to_vec());

        settings.score_key = Some("0123456789abcdef0123456789abcdef".to_string());
        assert_eq!(settings.resolve_score_key(Some(String::new())).unwrap(), b"0123456789abcdef0123456789abcdef".to_vec());

        let env_key = "fedcba9876543210fedcba9876543210".to_string();
        assert_eq!(settings.resolve_score_key(Some(env_key.clone())).unwrap(), env_key.into_bytes());
    }

    #[test]
    fn env_key_of_wrong_length_is_rejected() {
        let settings = Settings::default();
        assert!(matches!(settings.resolve_score_key(Some("env".to_string())), Err(GameError::Config(_))));

        let long = "x".repeat(33);
        assert!(matches!(settings.resolve_score_key(Some(long)), Err(GameError::Config(_))));
    }
}
