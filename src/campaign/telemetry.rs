//! Rolling journal of applied phases, optionally mirrored to a JSON lines file.
use std::{
    collections::VecDeque,
    fs::{create_dir_all, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use bevy::{ecs::system::SystemParam, log::warn, prelude::*};
use serde::Serialize;

use super::orchestrator::PhaseReport;

const DEFAULT_PHASE_LOG_PATH: &str = "logs/phase_history.jsonl";

const DEFAULT_PHASE_JOURNAL_CAPACITY: usize = 32;

/// Recent phase applications, newest last.
#[derive(Resource, Debug)]
pub struct PhaseJournal {
    capacity: usize,
    records: VecDeque<PhaseJournalRecord>,
}

impl PhaseJournal {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: VecDeque::new(),
        }
    }

    pub fn push(&mut self, record: PhaseJournalRecord) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn records(&self) -> impl Iterator<Item = &PhaseJournalRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&PhaseJournalRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for PhaseJournal {
    fn default() -> Self {
        Self::new(DEFAULT_PHASE_JOURNAL_CAPACITY)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PhaseJournalRecord {
    pub occurred_at_seconds: f64,
    pub report: PhaseReport,
}

/// Pending journal records waiting to be appended to disk.
#[derive(Resource, Debug)]
pub struct PhaseJournalLog {
    output_path: PathBuf,
    pending: Vec<PhaseJournalRecord>,
}

impl PhaseJournalLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
            pending: Vec::new(),
        }
    }

    pub fn push(&mut self, record: &PhaseJournalRecord) {
        self.pending.push(*record);
    }

    fn ensure_directory(&self) -> std::io::Result<()> {
        if let Some(parent) = self.output_path.parent() {
            create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        self.ensure_directory()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)?;

        for record in std::mem::take(&mut self.pending) {
            serde_json::to_writer(&mut file, &SerializablePhaseRecord::from(record))?;
            file.write_all(b"\n")?;
        }

        file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for PhaseJournalLog {
    fn default() -> Self {
        Self::new(DEFAULT_PHASE_LOG_PATH)
    }
}

/// Flushes pending journal entries, logging a warning if the write fails.
pub fn flush_phase_journal_log(mut log: ResMut<PhaseJournalLog>) {
    if let Err(err) = log.flush() {
        warn!("Failed to write phase history to {:?}: {}", log.path(), err);
    }
}

/// Logs applied phases and feeds the journal when its resources exist.
#[derive(SystemParam)]
pub struct PhaseRecorder<'w> {
    time: Option<Res<'w, Time>>,
    journal: Option<ResMut<'w, PhaseJournal>>,
    log: Option<ResMut<'w, PhaseJournalLog>>,
}

impl PhaseRecorder<'_> {
    pub fn record(&mut self, report: PhaseReport) {
        info!(
            "Applied {} (restored {}, reasserted {}, applied {}, skipped {}, pruned {})",
            report.stamp,
            report.restored,
            report.reasserted,
            report.applied,
            report.skipped,
            report.pruned
        );

        let record = PhaseJournalRecord {
            occurred_at_seconds: self
                .time
                .as_ref()
                .map_or(0.0, |time| time.elapsed_secs_f64()),
            report,
        };
        if let Some(log) = self.log.as_mut() {
            log.push(&record);
        }
        if let Some(journal) = self.journal.as_mut() {
            journal.push(record);
        }
    }
}

#[derive(Serialize)]
struct SerializablePhaseRecord {
    occurred_at_seconds: f64,
    day: u32,
    phase: String,
    restored: usize,
    reasserted: usize,
    pruned: usize,
    applied: usize,
    skipped: usize,
}

impl From<PhaseJournalRecord> for SerializablePhaseRecord {
    fn from(value: PhaseJournalRecord) -> Self {
        let report = value.report;
        Self {
            occurred_at_seconds: value.occurred_at_seconds,
            day: report.stamp.day,
            phase: report.stamp.phase.label().to_ascii_lowercase(),
            restored: report.restored,
            reasserted: report.reasserted,
            pruned: report.pruned,
            applied: report.applied,
            skipped: report.skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, time::SystemTime};

    use serde_json::Value;

    use super::*;
    use crate::campaign::components::{Phase, PhaseStamp};

    fn record(day: u32, phase: Phase, at: f64) -> PhaseJournalRecord {
        PhaseJournalRecord {
            occurred_at_seconds: at,
            report: PhaseReport {
                stamp: PhaseStamp::new(day, phase),
                restored: 2,
                reasserted: 1,
                pruned: 0,
                applied: 4,
                skipped: 1,
            },
        }
    }

    #[test]
    fn journal_drops_oldest_records_when_full() {
        let mut journal = PhaseJournal::new(2);
        journal.push(record(1, Phase::Morning, 1.0));
        journal.push(record(1, Phase::Night, 2.0));
        journal.push(record(2, Phase::Morning, 3.0));

        assert_eq!(journal.len(), 2);
        assert!(journal
            .records()
            .all(|record| record.occurred_at_seconds >= 2.0));
        assert_eq!(
            journal.latest().map(|record| record.report.stamp),
            Some(PhaseStamp::new(2, Phase::Morning))
        );
    }

    #[test]
    fn log_writes_json_lines() {
        let unique_suffix = SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = env::temp_dir().join(format!("phase_log_test_{}.jsonl", unique_suffix));

        let mut log = PhaseJournalLog::new(&path);
        log.push(&record(4, Phase::Night, 12.5));
        assert!(!log.is_empty());
        log.flush().expect("phase log should flush");
        assert!(log.is_empty());

        let raw = fs::read_to_string(&path).expect("log file should exist");
        let lines: Vec<_> = raw.lines().collect();
        assert_eq!(lines.len(), 1);

        let value: Value = serde_json::from_str(lines[0]).expect("json line should parse");
        assert_eq!(value["day"], 4);
        assert_eq!(value["phase"], "night");
        assert_eq!(value["applied"], 4);
        assert_eq!(value["skipped"], 1);

        let _ = fs::remove_file(&path);
    }
}
