//! abyss-logging: NDJSON event log for self-play runs.
//!
//! Events are serialized one JSON object per line and only ever appended,
//! so a run can be reconstructed after the fact by replaying the file.
//! Writers may die mid-line; readers are expected to skip anything that
//! does not parse as a whole object.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One AI decision inside a game.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,

    pub game_id: u64,
    pub round: u8,
    pub turn: u32,
    pub player: usize,
    pub oxygen: u8,
    /// Short move name (CONTINUE, RETURN, COLLECT, LEAVE, DROP, END).
    pub chosen_move: &'static str,
    pub elapsed_ms: u64,
}

/// One finished game.
#[derive(Debug, Clone, Serialize)]
pub struct GameEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,

    pub game_id: u64,
    pub num_players: usize,
    /// Seat letters the game was launched with (e.g. "RB").
    pub seats: String,
    pub winner: usize,
    pub scores: Vec<i32>,
    pub moves_played: u32,
    pub elapsed_ms: u64,
}

#[derive(Debug)]
pub enum NdjsonError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl From<io::Error> for NdjsonError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for NdjsonError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl std::fmt::Display for NdjsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "ndjson io error: {}", e),
            Self::Json(e) => write!(f, "ndjson encode error: {}", e),
        }
    }
}

impl std::error::Error for NdjsonError {}

/// Buffered, append-only event sink. Every `write_event` emits exactly one
/// object and one trailing newline.
pub struct NdjsonWriter {
    out: BufWriter<File>,
    unflushed: u64,
    flush_interval: u64,
}

impl NdjsonWriter {
    /// Open (creating if needed) a log file in append mode, with no
    /// periodic flushing.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// As [`open_append`](Self::open_append), flushing after every
    /// `flush_interval` lines. Zero disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_interval: u64,
    ) -> Result<Self, NdjsonError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            out: BufWriter::new(file),
            unflushed: 0,
            flush_interval,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        self.unflushed += 1;
        if self.flush_interval > 0 && self.unflushed >= self.flush_interval {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.out.flush()?;
        self.unflushed = 0;
        Ok(())
    }
}

/// Milliseconds since the Unix epoch, for event timestamps.
pub fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
