//! Durable log of completed fact checks.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::verdict::Verdict;

/// Sink for completed verdicts.
///
/// Append failures are logged and swallowed by the orchestrator; the log is
/// an audit trail, not a precondition for returning results.
pub trait ResultsLog: Send + Sync {
    fn append(&self, verdict: &Verdict) -> io::Result<()>;
}

/// Results log writing one JSON object per line.
pub struct JsonlResultsLog {
    file: Mutex<File>,
}

impl JsonlResultsLog {
    /// Opens (or creates) the log file for appending.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl ResultsLog for JsonlResultsLog {
    fn append(&self, verdict: &Verdict) -> io::Result<()> {
        let line = serde_json::to_string(verdict)?;
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("results log lock poisoned"))?;
        writeln!(file, "{line}")?;
        file.flush()
    }
}

/// In-memory results log for tests.
#[cfg(any(test, feature = "mock"))]
#[derive(Default)]
pub struct MockResultsLog {
    entries: Mutex<Vec<Verdict>>,
}

#[cfg(any(test, feature = "mock"))]
impl MockResultsLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Verdict> {
        self.entries.lock().unwrap().clone()
    }
}

#[cfg(any(test, feature = "mock"))]
impl ResultsLog for MockResultsLog {
    fn append(&self, verdict: &Verdict) -> io::Result<()> {
        self.entries.lock().unwrap().push(verdict.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jsonl_log_appends_one_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claim_checks.jsonl");

        let log = JsonlResultsLog::open(&path).unwrap();
        log.append(&Verdict::degraded("First claim.", "test")).unwrap();
        log.append(&Verdict::degraded("Second claim.", "test")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Verdict = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.sentence, "First claim.");
        let second: Verdict = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.sentence, "Second claim.");
    }

    #[test]
    fn test_jsonl_log_appends_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claim_checks.jsonl");

        JsonlResultsLog::open(&path)
            .unwrap()
            .append(&Verdict::degraded("First claim.", "test"))
            .unwrap();
        JsonlResultsLog::open(&path)
            .unwrap()
            .append(&Verdict::degraded("Second claim.", "test"))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
