use std::collections::{HashSet, VecDeque};

use crate::{Pid, Ticks};

/// A process waiting in the round robin rotation together with
/// the part of its time quantum it has not used yet.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub pid: Pid,
    pub quantum: Ticks,
}

/// The round robin rotation.
///
/// Entries keep the order in which they entered the queue. A PID is present
/// at most once.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    entries: VecDeque<QueueEntry>,
    members: HashSet<Pid>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        ReadyQueue::default()
    }

    /// Appends `pid` with a fresh `quantum`.
    ///
    /// Returns `false` and leaves the queue untouched if `pid` is already queued.
    pub fn push_back(&mut self, pid: Pid, quantum: Ticks) -> bool {
        if !self.members.insert(pid) {
            return false;
        }
        self.entries.push_back(QueueEntry { pid, quantum });
        true
    }

    pub fn pop_front(&mut self) -> Option<QueueEntry> {
        let entry = self.entries.pop_front()?;
        self.members.remove(&entry.pid);
        Some(entry)
    }

    pub fn remove(&mut self, pid: Pid) -> Option<QueueEntry> {
        if !self.members.remove(&pid) {
            return None;
        }
        let index = self.entries.iter().position(|entry| entry.pid == pid)?;
        self.entries.remove(index)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.members.contains(&pid)
    }

    pub fn front(&self) -> Option<&QueueEntry> {
        self.entries.front()
    }

    pub fn front_mut(&mut self) -> Option<&mut QueueEntry> {
        self.entries.front_mut()
    }

    /// Moves the front entry to the back of the queue and gives it a fresh `quantum`.
    pub fn rotate(&mut self, quantum: Ticks) {
        if let Some(mut entry) = self.entries.pop_front() {
            entry.quantum = quantum;
            self.entries.push_back(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter()
    }

    /// The queued PIDs, front first.
    pub fn pids(&self) -> Vec<Pid> {
        self.entries.iter().map(|entry| entry.pid).collect()
    }
}
