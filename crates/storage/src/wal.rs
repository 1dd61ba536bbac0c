// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only, newline-delimited-JSON write-ahead log.
//!
//! Each line is a `{seq, event}` pair. Corruption (invalid UTF-8, malformed
//! JSON, a truncated trailing line) is never fatal: on open the corrupt tail
//! is rotated out to a `.bak` file (keeping up to three generations) and
//! replay proceeds with the valid prefix. Callers needing a fresh start after
//! a crash get a clean log back rather than an error.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use apmas_core::StateEvent;

/// Entries buffered since the last flush before a flush is recommended.
pub const FLUSH_ENTRY_THRESHOLD: usize = 100;
/// Time since the last flush before a flush is recommended, if anything is buffered.
pub const FLUSH_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, thiserror::Error)]
pub enum WalError {
    #[error("wal io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("wal serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One decoded WAL line.
#[derive(Debug, Clone, PartialEq)]
pub struct WalEntry {
    pub seq: u64,
    pub event: StateEvent,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct WireEntry {
    seq: u64,
    event: StateEvent,
}

/// The write-ahead log for one data directory's State Store.
pub struct Wal {
    path: PathBuf,
    writer: BufWriter<File>,
    write_seq: u64,
    processed_seq: u64,
    /// Byte offset into the on-disk file up to which `next_unprocessed` has read.
    read_offset: u64,
    unflushed_count: usize,
    last_flush: Instant,
}

impl Wal {
    /// Open (creating if absent) the log at `path`, recovering from any
    /// trailing corruption, and position the unprocessed-entry cursor after
    /// every entry with `seq <= processed_seq` (the sequence number recorded
    /// in the last snapshot, or 0 for a fresh start).
    pub fn open(path: impl AsRef<Path>, processed_seq: u64) -> Result<Self, WalError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            fs::write(&path, b"")?;
        }

        let bytes = fs::read(&path)?;
        let (entries, _, had_corruption) = parse_prefix(&bytes);

        if had_corruption {
            rotate_backups(&path)?;
            fs::write(&path, &serialize_entries(&entries)?)?;
        }

        let final_bytes = fs::read(&path)?;
        let (final_entries, offsets, _) = parse_prefix(&final_bytes);

        let write_seq = final_entries.last().map(|e| e.seq).unwrap_or(0);
        let read_offset = final_entries
            .iter()
            .zip(offsets.iter())
            .filter(|(e, _)| e.seq <= processed_seq)
            .last()
            .map(|(_, &off)| off)
            .unwrap_or(0);

        let file = OpenOptions::new().append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
            write_seq,
            processed_seq,
            read_offset,
            unflushed_count: 0,
            last_flush: Instant::now(),
        })
    }

    /// Append one event, returning its assigned sequence number. Buffered
    /// until [`Wal::flush`]; callers that need durability before continuing
    /// must flush explicitly.
    pub fn append(&mut self, event: &StateEvent) -> Result<u64, WalError> {
        let seq = self.write_seq + 1;
        let line = serde_json::to_string(&WireEntry {
            seq,
            event: event.clone(),
        })?;
        writeln!(self.writer, "{line}")?;
        self.write_seq = seq;
        self.unflushed_count += 1;
        Ok(seq)
    }

    /// Flush buffered writes and fsync.
    pub fn flush(&mut self) -> Result<(), WalError> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        self.unflushed_count = 0;
        self.last_flush = Instant::now();
        Ok(())
    }

    pub fn write_seq(&self) -> u64 {
        self.write_seq
    }

    pub fn processed_seq(&self) -> u64 {
        self.processed_seq
    }

    /// Record that everything up to and including `seq` has been replayed
    /// into `MaterializedState` (e.g. covered by a fresh snapshot).
    pub fn mark_processed(&mut self, seq: u64) {
        if seq > self.processed_seq {
            self.processed_seq = seq;
        }
    }

    /// Whether enough is buffered (by count or time) that a flush is due.
    pub fn needs_flush(&self) -> bool {
        self.unflushed_count >= FLUSH_ENTRY_THRESHOLD
            || (self.unflushed_count > 0 && self.last_flush.elapsed() >= FLUSH_INTERVAL)
    }

    /// Read the next entry past the internal read cursor, re-reading the
    /// on-disk file each call so entries appended by this or another handle
    /// become visible. Returns `Ok(None)` both at end-of-file and when the
    /// next line is corrupt — in the corrupt case the cursor still advances
    /// past it, so a later valid line is not permanently blocked.
    pub fn next_unprocessed(&mut self) -> Result<Option<WalEntry>, WalError> {
        let bytes = fs::read(&self.path)?;
        let offset = self.read_offset as usize;
        if offset >= bytes.len() {
            return Ok(None);
        }
        let rest = &bytes[offset..];
        let Some(nl) = rest.iter().position(|&b| b == b'\n') else {
            return Ok(None);
        };
        let line = &rest[..nl];
        self.read_offset += (nl + 1) as u64;

        if line.is_empty() {
            return self.next_unprocessed();
        }
        let Ok(line_str) = std::str::from_utf8(line) else {
            return Ok(None);
        };
        match serde_json::from_str::<WireEntry>(line_str) {
            Ok(entry) => Ok(Some(WalEntry {
                seq: entry.seq,
                event: entry.event,
            })),
            Err(_) => Ok(None),
        }
    }

    /// All valid entries with `seq > seq`, stopping at the first corrupt line.
    pub fn entries_after(&self, seq: u64) -> Result<Vec<WalEntry>, WalError> {
        let bytes = fs::read(&self.path)?;
        let (entries, _, _) = parse_prefix(&bytes);
        Ok(entries.into_iter().filter(|e| e.seq > seq).collect())
    }

    /// Rewrite the log keeping only entries with `seq >= seq` (snapshot compaction).
    pub fn truncate_before(&mut self, seq: u64) -> Result<(), WalError> {
        self.flush()?;
        let bytes = fs::read(&self.path)?;
        let (entries, _, _) = parse_prefix(&bytes);
        let kept: Vec<_> = entries.into_iter().filter(|e| e.seq >= seq).collect();
        fs::write(&self.path, &serialize_entries(&kept)?)?;
        self.writer = BufWriter::new(OpenOptions::new().append(true).open(&self.path)?);
        self.read_offset = 0;
        Ok(())
    }
}

fn serialize_entries(entries: &[WalEntry]) -> Result<Vec<u8>, WalError> {
    let mut out = Vec::new();
    for entry in entries {
        let line = serde_json::to_string(&WireEntry {
            seq: entry.seq,
            event: entry.event.clone(),
        })?;
        out.extend_from_slice(line.as_bytes());
        out.push(b'\n');
    }
    Ok(out)
}

/// Parse as many valid `{seq, event}` lines as possible from the start of
/// `bytes`, returning the entries, each entry's end-of-line byte offset, and
/// whether parsing stopped due to corruption rather than running out of input.
fn parse_prefix(bytes: &[u8]) -> (Vec<WalEntry>, Vec<u64>, bool) {
    let mut entries = Vec::new();
    let mut offsets = Vec::new();
    let mut pos = 0usize;
    let mut had_corruption = false;

    loop {
        if pos >= bytes.len() {
            break;
        }
        let rest = &bytes[pos..];
        let Some(nl) = rest.iter().position(|&b| b == b'\n') else {
            if !rest.is_empty() {
                had_corruption = true;
            }
            break;
        };
        let line = &rest[..nl];
        pos += nl + 1;

        if line.is_empty() {
            continue;
        }
        let Ok(line_str) = std::str::from_utf8(line) else {
            had_corruption = true;
            break;
        };
        match serde_json::from_str::<WireEntry>(line_str) {
            Ok(entry) => {
                entries.push(WalEntry {
                    seq: entry.seq,
                    event: entry.event,
                });
                offsets.push(pos as u64);
            }
            Err(_) => {
                had_corruption = true;
                break;
            }
        }
    }

    (entries, offsets, had_corruption)
}

/// Rotate up to three backup generations: `.bak.2` -> `.bak.3`, `.bak` ->
/// `.bak.2`, then the corrupt file at `path` -> `.bak`. The oldest generation
/// is evicted.
fn rotate_backups(path: &Path) -> std::io::Result<()> {
    let bak = path.with_extension("bak");
    let bak2 = path.with_extension("bak.2");
    let bak3 = path.with_extension("bak.3");

    if bak2.exists() {
        fs::rename(&bak2, &bak3)?;
    }
    if bak.exists() {
        fs::rename(&bak, &bak2)?;
    }
    fs::rename(path, &bak)?;
    Ok(())
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
