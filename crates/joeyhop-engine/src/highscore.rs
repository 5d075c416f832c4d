//! Persistence for the single high-score value.
//!
//! The value lives under one fixed key. A store that has never been written
//! reads as zero. [`JsonFileHighScore`] keeps the key in a small JSON object
//! on disk and replaces the file by rename, so a crash mid-write leaves the
//! previous value intact.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// Key the high score is stored under.
pub const HIGH_SCORE_KEY: &str = "tm-highscore";

/// Errors from reading or writing a high-score store.
#[derive(Debug, thiserror::Error)]
pub enum HighScoreError {
    #[error("high score I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("high score file is malformed: {0}")]
    Format(String),
}

/// Somewhere a high score can be kept between sessions.
pub trait HighScoreStore {
    /// The stored score, or zero if none has been saved.
    fn load(&self) -> Result<u32, HighScoreError>;

    /// Replace the stored score.
    fn save(&mut self, score: u32) -> Result<(), HighScoreError>;
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// A store that forgets everything when dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryHighScore {
    score: Option<u32>,
}

impl MemoryHighScore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> Result<u32, HighScoreError> {
        Ok(self.score.unwrap_or(0))
    }

    fn save(&mut self, score: u32) -> Result<(), HighScoreError> {
        self.score = Some(score);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON file
// ---------------------------------------------------------------------------

/// A store backed by a JSON object file. Other keys in the file are kept.
#[derive(Debug, Clone)]
pub struct JsonFileHighScore {
    path: PathBuf,
}

impl JsonFileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Map<String, Value>, HighScoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(HighScoreError::Format(format!(
                "expected a JSON object, found {other}"
            ))),
            Err(e) => Err(HighScoreError::Format(e.to_string())),
        }
    }
}

impl HighScoreStore for JsonFileHighScore {
    fn load(&self) -> Result<u32, HighScoreError> {
        let map = self.read_object()?;
        match map.get(HIGH_SCORE_KEY) {
            None | Some(Value::Null) => Ok(0),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| HighScoreError::Format(format!("score out of range: {n}"))),
            // Browser storage keeps strings.
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| HighScoreError::Format(format!("score is not a number: {s:?}"))),
            Some(other) => Err(HighScoreError::Format(format!(
                "unexpected score value: {other}"
            ))),
        }
    }

    fn save(&mut self, score: u32) -> Result<(), HighScoreError> {
        // A corrupt file is replaced rather than blocking every future save.
        let mut map = self.read_object().unwrap_or_default();
        map.insert(HIGH_SCORE_KEY.to_string(), Value::from(score));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| HighScoreError::Format(e.to_string()))?;
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, contents)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    /// A fresh directory and the score file path inside it. The directory
    /// is removed when the `TempDir` drops, so keep it bound for the test.
    fn scratch() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        (dir, path)
    }

    #[test]
    fn memory_defaults_to_zero() {
        let mut store = MemoryHighScore::new();
        assert_eq!(store.load().unwrap(), 0);
        store.save(140).unwrap();
        assert_eq!(store.load().unwrap(), 140);
    }

    #[test]
    fn missing_file_reads_zero() {
        let (_dir, path) = scratch();
        let store = JsonFileHighScore::new(path);
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn file_save_then_load() {
        let (_dir, path) = scratch();
        let mut store = JsonFileHighScore::new(&path);
        store.save(310).unwrap();
        assert_eq!(JsonFileHighScore::new(&path).load().unwrap(), 310);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn save_creates_parent_dirs_inside_scratch() {
        let (dir, _) = scratch();
        let root = dir.path().to_path_buf();
        let nested = root.join("saves").join("scores.json");

        JsonFileHighScore::new(&nested).save(42).unwrap();
        assert_eq!(JsonFileHighScore::new(&nested).load().unwrap(), 42);

        drop(dir);
        assert!(!root.exists());
    }

    #[test]
    fn other_keys_survive() {
        let (_dir, path) = scratch();
        std::fs::write(&path, r#"{"volume": 3, "tm-highscore": "25"}"#).unwrap();

        let mut store = JsonFileHighScore::new(&path);
        assert_eq!(store.load().unwrap(), 25);
        store.save(90).unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["volume"], 3);
        assert_eq!(written[HIGH_SCORE_KEY], 90);
    }

    #[test]
    fn garbage_is_a_format_error() {
        let (_dir, path) = scratch();
        std::fs::write(&path, "[1, 2").unwrap();
        let store = JsonFileHighScore::new(&path);
        assert!(matches!(store.load(), Err(HighScoreError::Format(_))));
    }
}
