use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::cipher;
use crate::error::PersistenceError;

pub const DEFAULT_PLAYER_NAME: &str = "Anon";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub timestamp: DateTime<Utc>,
    pub score: u32,
    pub player_name: String,
}

impl fmt::Display for HighScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.timestamp.to_rfc2822(), self.player_name, self.score)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores(pub Vec<HighScore>);

impl HighScores {
    /// Best `limit` entries, highest score first.
    pub fn top(&self, limit: usize) -> Vec<HighScore> {
        let mut sorted = self.0.clone();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted.truncate(limit);
        sorted
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Encrypted high score file.
///
/// `save` rewrites the whole file in place; there is no locking or atomic
/// rename, so a crash mid-write can leave a corrupt store behind.
#[derive(Clone)]
pub struct HighScoreStore {
    path: PathBuf,
    key: Vec<u8>,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>, key: Vec<u8>) -> Self {
        HighScoreStore { path: path.into(), key }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file means no scores yet.
    pub fn load(&self) -> Result<HighScores, PersistenceError> {
        info!("Loading high score from file: {}", self.path.display());

        let content = match std::fs::read(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(HighScores::default()),
            Err(err) => return Err(err.into()),
        };

        let decrypted = cipher::decrypt(&self.key, &content)?;
        bincode::deserialize(&decrypted).map_err(PersistenceError::Decode)
    }

    /// Appends `entry` to what is on disk. A store that fails to load is left untouched.
    pub fn save(&self, entry: HighScore) -> Result<(), PersistenceError> {
        let mut scores = self.load()?;
        scores.0.push(entry);

        let payload = bincode::serialize(&scores).map_err(PersistenceError::Encode)?;
        let encrypted = cipher::encrypt(&self.key, &payload)?;
        std::fs::write(&self.path, encrypted)?;

        info!("High score successfully saved to file: {}", self.path.display());
        Ok(())
    }
}
