use std::num::NonZeroUsize;

use crate::error::SimError;
use crate::{Pid, Process, ProcessSet, ProcessState, SchedulingDecision, Ticks};

/// The runtime state of a process during a single run.
///
/// `executed + remaining == burst` holds at all times.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pcb {
    process: Process,
    state: ProcessState,
    executed: Ticks,
}

impl Pcb {
    fn new(process: Process) -> Self {
        Pcb {
            process,
            state: ProcessState::Waiting,
            executed: 0,
        }
    }

    pub fn pid(&self) -> Pid {
        self.process.pid()
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn arrival_time(&self) -> Ticks {
        self.process.arrival_time()
    }

    pub fn burst_time(&self) -> Ticks {
        self.process.burst_time()
    }

    pub fn executed(&self) -> Ticks {
        self.executed
    }

    pub fn remaining(&self) -> Ticks {
        self.process.burst_time() - self.executed
    }

    pub fn is_complete(&self) -> bool {
        self.executed == self.process.burst_time()
    }

    /// Arrived and not yet complete.
    pub fn is_ready(&self, now: Ticks) -> bool {
        self.arrival_time() <= now && !self.is_complete()
    }
}

/// The process control blocks of a run, indexed by PID.
#[derive(Debug)]
pub(crate) struct ProcessTable {
    pcbs: Vec<Pcb>,
}

impl ProcessTable {
    pub(crate) fn new(processes: &ProcessSet) -> Self {
        ProcessTable {
            pcbs: processes.iter().copied().map(Pcb::new).collect(),
        }
    }

    pub(crate) fn get(&self, pid: Pid) -> Result<&Pcb, SimError> {
        self.pcbs
            .get(pid.index())
            .ok_or_else(|| SimError::Invariant(format!("unknown process {pid}")))
    }

    /// Moves every process that has arrived by `now` out of the waiting state.
    pub(crate) fn admit(&mut self, now: Ticks) {
        for pcb in self.pcbs.iter_mut() {
            if pcb.state == ProcessState::Waiting && pcb.arrival_time() <= now {
                pcb.state = ProcessState::Ready;
            }
        }
    }

    /// The ready set at `now`, in PID order.
    pub(crate) fn ready(&self, now: Ticks) -> impl Iterator<Item = &Pcb> {
        self.pcbs.iter().filter(move |pcb| pcb.is_ready(now))
    }

    /// Marks `pid` as the running process, the previous one goes back to ready.
    pub(crate) fn dispatch(&mut self, pid: Pid) -> Result<(), SimError> {
        let pcb = self.get(pid)?;
        if pcb.is_complete() {
            return Err(SimError::Invariant(format!(
                "process {pid} was selected with no remaining time"
            )));
        }

        for pcb in self.pcbs.iter_mut() {
            if pcb.pid() == pid {
                pcb.state = ProcessState::Running;
            } else if pcb.state == ProcessState::Running {
                pcb.state = ProcessState::Ready;
            }
        }
        Ok(())
    }

    /// Accounts one executed time unit to `pid`.
    pub(crate) fn exec(&mut self, pid: Pid) -> Result<(), SimError> {
        let pcb = self
            .pcbs
            .get_mut(pid.index())
            .ok_or_else(|| SimError::Invariant(format!("unknown process {pid}")))?;
        if pcb.is_complete() {
            return Err(SimError::Invariant(format!(
                "process {pid} executed past its burst time of {}",
                pcb.burst_time()
            )));
        }

        pcb.executed += 1;
        if pcb.is_complete() {
            pcb.state = ProcessState::Completed;
        }
        Ok(())
    }

    pub(crate) fn all_complete(&self) -> bool {
        self.pcbs.iter().all(Pcb::is_complete)
    }

    /// The earliest arrival after `now` of a process that still has work.
    pub(crate) fn next_arrival(&self, now: Ticks) -> Option<Ticks> {
        self.pcbs
            .iter()
            .filter(|pcb| !pcb.is_complete() && pcb.arrival_time() > now)
            .map(Pcb::arrival_time)
            .min()
    }

    /// The decision to take when nothing is ready at `now`.
    pub(crate) fn idle(&self, now: Ticks) -> Result<SchedulingDecision, SimError> {
        if self.all_complete() {
            return Ok(SchedulingDecision::Done);
        }
        match self.next_arrival(now).and_then(|at| NonZeroUsize::new(at - now)) {
            Some(amount) => Ok(SchedulingDecision::Sleep(amount)),
            None => Err(SimError::Invariant(format!(
                "no process is ready at {now} and none arrives later"
            ))),
        }
    }

    pub(crate) fn list(&self) -> Vec<&Pcb> {
        self.pcbs.iter().collect()
    }
}
