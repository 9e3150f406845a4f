use std::fs::{File, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::error::{GameError, Result};

/// Sends log output to `log_file` (appending), since the terminal itself is
/// taken by the game. `RUST_LOG` overrides the default `info` level.
pub fn init(log_file: &Path) -> Result<()> {
    let file = open_log_file(log_file)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init()
        .map_err(|e| GameError::Config(format!("Failed to initialize logging: {}", e)))
}

fn open_log_file(log_file: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| GameError::Config(format!("Failed to open log file {}: {}", log_file.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritable_log_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("log.txt");
        assert!(matches!(open_log_file(&path), Err(GameError::Config(_))));
    }

    #[test]
    fn log_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
