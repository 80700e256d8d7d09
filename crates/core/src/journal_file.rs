//! File-backed JSONL intent journal with a SHA-256 hash chain.
//!
//! The file format is line-delimited JSON (`.jsonl`):
//! - Line 1: header with `format_version`, `seed` and the full `config`.
//! - Lines 2+: one record per non-idle human intent, frames strictly increasing, each carrying a
//!   SHA-256 hash chain (`prev_sha256_hex`, `sha256_hex`) so edits and truncation are detected.
//!
//! Every record is flushed as soon as it is appended, so a crashed run still leaves a
//! replayable prefix.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::ArenaConfig;
use crate::journal::{IntentJournal, IntentRecord, JOURNAL_FORMAT_VERSION};
use crate::types::HumanIntent;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct FileHeader {
    format_version: u16,
    seed: u64,
    config: ArenaConfig,
}

/// Canonical hash input for one record, concatenated with `prev_sha256_hex`.
#[derive(Serialize)]
struct RecordBody<'a> {
    seq: u64,
    frame: u64,
    intent: &'a HumanIntent,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    seq: u64,
    frame: u64,
    intent: HumanIntent,
    prev_sha256_hex: String,
    sha256_hex: String,
}

/// Previous-hash of the first record in a chain.
const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

fn compute_record_sha256(body_json: &str, prev_sha256_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    hasher.update(prev_sha256_hex.as_bytes());
    format!("{:064x}", hasher.finalize())
}

/// Streams intents of a running match into a journal file.
pub struct JournalWriter {
    writer: BufWriter<File>,
    last_sha256_hex: String,
    next_seq: u64,
    last_frame: Option<u64>,
}

impl JournalWriter {
    /// Creates the file (and missing parent directories) and writes the header line.
    pub fn create(path: &Path, seed: u64, config: &ArenaConfig) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);

        let header =
            FileHeader { format_version: JOURNAL_FORMAT_VERSION, seed, config: config.clone() };
        let header_json = serde_json::to_string(&header).map_err(io::Error::other)?;
        writeln!(writer, "{header_json}")?;
        writer.flush()?;

        Ok(Self {
            writer,
            last_sha256_hex: INITIAL_HASH.to_string(),
            next_seq: 0,
            last_frame: None,
        })
    }

    /// Appends one intent and flushes. Idle intents are skipped; returns whether a line was written.
    /// A frame at or before the last written one is rejected with `InvalidInput`.
    pub fn append(&mut self, frame: u64, intent: &HumanIntent) -> io::Result<bool> {
        if intent.is_idle() {
            return Ok(false);
        }
        if let Some(last) = self.last_frame.filter(|&last| frame <= last) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("frame {frame} does not follow frame {last}"),
            ));
        }
        let body = RecordBody { seq: self.next_seq, frame, intent };
        let body_json = serde_json::to_string(&body).map_err(io::Error::other)?;
        let sha256_hex = compute_record_sha256(&body_json, &self.last_sha256_hex);

        let record = FileRecord {
            seq: self.next_seq,
            frame,
            intent: *intent,
            prev_sha256_hex: self.last_sha256_hex.clone(),
            sha256_hex: sha256_hex.clone(),
        };
        let record_json = serde_json::to_string(&record).map_err(io::Error::other)?;
        writeln!(self.writer, "{record_json}")?;
        self.writer.flush()?;

        self.last_sha256_hex = sha256_hex;
        self.next_seq += 1;
        self.last_frame = Some(frame);
        Ok(true)
    }

    /// Hash of the last written record, or the initial hash before any record.
    pub fn chain_head(&self) -> &str {
        &self.last_sha256_hex
    }

    pub fn records_written(&self) -> u64 {
        self.next_seq
    }
}

#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: IntentJournal,
    /// SHA-256 hex of the last valid record (or the initial hash if there are none).
    pub last_sha256_hex: String,
}

#[derive(Debug, Error)]
pub enum JournalLoadError {
    #[error("journal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("journal file is empty")]
    EmptyFile,
    #[error("invalid journal header at line {line}: {message}")]
    InvalidHeader { line: usize, message: String },
    #[error("invalid journal record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
    /// The file ended without a trailing newline.
    #[error("incomplete journal line at line {line}")]
    IncompleteLine { line: usize },
    #[error("SHA-256 hash chain broken at line {line}")]
    HashChainBroken { line: usize },
}

/// Loads and validates a JSONL journal, stopping at the first bad line.
pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(JournalLoadError::EmptyFile);
    }
    if !content.ends_with('\n') {
        return Err(JournalLoadError::IncompleteLine { line: lines.len() });
    }

    let header: FileHeader = serde_json::from_str(lines[0])
        .map_err(|e| JournalLoadError::InvalidHeader { line: 1, message: e.to_string() })?;
    if header.format_version != JOURNAL_FORMAT_VERSION {
        return Err(JournalLoadError::InvalidHeader {
            line: 1,
            message: format!("unsupported format version {}", header.format_version),
        });
    }
    let mut journal = IntentJournal::new(header.seed, header.config);

    let mut prev_sha256_hex = INITIAL_HASH.to_string();
    let mut last_frame: Option<u64> = None;
    for (seq, line) in (0_u64..).zip(lines.iter().skip(1)) {
        let line_number = seq as usize + 2;
        let invalid = |message: String| JournalLoadError::InvalidRecord { line: line_number, message };

        if line.is_empty() {
            return Err(invalid("empty line".to_string()));
        }
        let record: FileRecord =
            serde_json::from_str(line).map_err(|e| invalid(e.to_string()))?;
        if record.seq != seq {
            return Err(invalid(format!("expected seq {seq}, found {}", record.seq)));
        }
        if let Some(last) = last_frame.filter(|&last| record.frame <= last) {
            return Err(invalid(format!("frame {} does not follow frame {last}", record.frame)));
        }
        if record.prev_sha256_hex != prev_sha256_hex {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }

        let body = RecordBody { seq: record.seq, frame: record.frame, intent: &record.intent };
        let body_json = serde_json::to_string(&body).map_err(|e| invalid(e.to_string()))?;
        if record.sha256_hex != compute_record_sha256(&body_json, &prev_sha256_hex) {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }

        journal.records.push(IntentRecord { frame: record.frame, intent: record.intent });
        last_frame = Some(record.frame);
        prev_sha256_hex = record.sha256_hex;
    }

    Ok(LoadedJournal { journal, last_sha256_hex: prev_sha256_hex })
}
