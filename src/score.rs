use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "arcade-snake";
const SCORE_FILE_NAME: &str = "scores.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Returns the platform data directory for this game.
#[must_use]
pub fn data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// Persists the single high-score value as JSON.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::at(data_dir().join(SCORE_FILE_NAME))
    }
}

impl HighScoreStore {
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the high score.
    ///
    /// Returns `Ok(0)` when the score file does not exist yet. Returns `Err`
    /// when the file exists but cannot be read or parsed.
    pub fn load(&self) -> io::Result<u32> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        serde_json::from_str::<ScoreFile>(&raw)
            .map(|file| file.high_score)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Writes the high score, creating parent directories when needed.
    pub fn save(&self, score: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&ScoreFile { high_score: score })
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

        fs::write(&self.path, json)?;
        debug!("high score {score} saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::HighScoreStore;

    #[test]
    fn saved_score_loads_back() {
        let store = HighScoreStore::at(unique_test_path("saved"));

        store.save(420).expect("score save should succeed");
        store.save(430).expect("second save should overwrite");

        assert_eq!(store.load().expect("load should succeed"), 430);
        cleanup_test_path(store.path().to_path_buf());
    }

    #[test]
    fn missing_score_file_returns_zero() {
        let store = HighScoreStore::at(unique_test_path("missing"));

        let loaded = store.load().expect("missing file should return Ok(0)");
        assert_eq!(loaded, 0);
    }

    #[test]
    fn malformed_score_file_returns_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "{\"high\": \"nope\"}").expect("test file write should succeed");

        assert!(
            HighScoreStore::at(&path).load().is_err(),
            "malformed file should return Err"
        );

        cleanup_test_path(path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("arcade-snake-score-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: PathBuf) {
        let _ = fs::remove_file(&path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
