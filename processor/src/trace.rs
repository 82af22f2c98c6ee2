use std::fmt::{self, Display};

use scheduler::{Pid, SimError, Ticks};

/// One busy time unit of the CPU.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    /// The clock time of the unit.
    pub time: Ticks,

    /// The process that executed during the unit.
    pub pid: Pid,
}

/// A run of consecutive time units executed by the same process.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Segment {
    pub pid: Pid,

    /// The first time unit of the run.
    pub start: Ticks,

    /// The time right after the last unit of the run.
    pub end: Ticks,
}

impl Segment {
    pub fn len(&self) -> Ticks {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t[{}, {})", self.pid, self.start, self.end)
    }
}

/// The chronological record of a simulation run.
///
/// Entries are appended in production order and their times strictly
/// increase, so no time unit is ever booked twice.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExecutionTrace {
    entries: Vec<TraceEntry>,
}

impl ExecutionTrace {
    pub fn new() -> Self {
        ExecutionTrace::default()
    }

    /// Records that `pid` executed during the unit starting at `time`.
    pub fn push(&mut self, time: Ticks, pid: Pid) -> Result<(), SimError> {
        if let Some(last) = self.entries.last() {
            if time <= last.time {
                return Err(SimError::Invariant(format!(
                    "unit {time} of process {pid} recorded after unit {}",
                    last.time
                )));
            }
        }
        self.entries.push(TraceEntry { time, pid });
        Ok(())
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter()
    }

    /// The time units executed by `pid`, in order.
    pub fn units(&self, pid: Pid) -> impl Iterator<Item = Ticks> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.pid == pid)
            .map(|entry| entry.time)
    }

    /// The number of time units executed by `pid`.
    pub fn count(&self, pid: Pid) -> usize {
        self.units(pid).count()
    }

    /// The last time unit executed by `pid`.
    pub fn last_unit(&self, pid: Pid) -> Option<Ticks> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.pid == pid)
            .map(|entry| entry.time)
    }

    /// Collapses the trace into runs of consecutive units of one process.
    ///
    /// A context switch or an idle gap ends a run even if the same process
    /// continues afterwards.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();
        for entry in &self.entries {
            if let Some(segment) = segments.last_mut() {
                if segment.pid == entry.pid && segment.end == entry.time {
                    segment.end += 1;
                    continue;
                }
            }
            segments.push(Segment {
                pid: entry.pid,
                start: entry.time,
                end: entry.time + 1,
            });
        }
        segments
    }
}

impl<'a> IntoIterator for &'a ExecutionTrace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Display for ExecutionTrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "PID\tSEGMENT")?;
        for segment in self.segments() {
            writeln!(f, "{}", segment)?;
        }
        Ok(())
    }
}
