//! Durable append-only result log
//!
//! One JSON record per finished game, one record per line, never
//! rewritten in place. A format-header line is written only when the log
//! is empty, so existing logs are appended to as-is. Appends are
//! serialized internally; callers must not hold any game or registry
//! lock while appending, so disk latency never blocks gameplay.

use crate::game::GameResult;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// First line of a fresh log file, identifying the record format.
const FORMAT_HEADER: &str = "{\"format\":\"codebreaker-results\",\"version\":1}";

/// Append-only sink for finished-game records.
pub struct ResultLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ResultLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one finished-game record, creating the file (and writing
    /// the format header) on first use.
    pub async fn append(&self, result: &GameResult) -> io::Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        let mut buf = String::new();
        if file.metadata().await?.len() == 0 {
            buf.push_str(FORMAT_HEADER);
            buf.push('\n');
        }

        let record = serde_json::to_string(result)?;
        buf.push_str(&record);
        buf.push('\n');

        file.write_all(buf.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}
