use std::num::NonZeroUsize;

use log::{debug, trace};

use super::ready_queue::ReadyQueue;
use super::table::{Pcb, ProcessTable};
use crate::error::SimError;
use crate::SchedulingDecision::Run;
use crate::{Pid, ProcessSet, Scheduler, SchedulingDecision, Ticks};

pub struct RoundRobin {
    table: ProcessTable,
    ready_queue: ReadyQueue,
    timeslice: NonZeroUsize,
}

impl RoundRobin {
    pub fn new(processes: &ProcessSet, timeslice: NonZeroUsize) -> Self {
        RoundRobin {
            table: ProcessTable::new(processes),
            ready_queue: ReadyQueue::new(),
            timeslice,
        }
    }

    /// Brings the rotation in line with the ready set at `now`.
    ///
    /// Newly ready processes enter at the back in PID order, completed
    /// processes leave the rotation.
    fn reconcile(&mut self, now: Ticks) {
        self.table.admit(now);
        let ready: Vec<Pid> = self.table.ready(now).map(Pcb::pid).collect();

        for &pid in &ready {
            if self.ready_queue.push_back(pid, self.timeslice.get()) {
                debug!("t={now} process {pid} enters the rotation");
            }
        }

        let finished: Vec<Pid> = self
            .ready_queue
            .iter()
            .map(|entry| entry.pid)
            .filter(|pid| !ready.contains(pid))
            .collect();
        for pid in finished {
            self.ready_queue.remove(pid);
            debug!("t={now} process {pid} leaves the rotation");
        }
    }
}

impl Scheduler for RoundRobin {
    fn name(&self) -> &'static str {
        "Round Robin"
    }

    fn next(&mut self, now: Ticks) -> Result<SchedulingDecision, SimError> {
        self.reconcile(now);

        let Some(&front) = self.ready_queue.front() else {
            return self.table.idle(now);
        };

        if front.quantum == 0 {
            // Unreachable through `next`, `reconcile` already removed
            // every completed process from the rotation.
            if self.table.get(front.pid)?.is_complete() {
                self.ready_queue.pop_front();
            } else {
                self.ready_queue.rotate(self.timeslice.get());
                debug!("t={now} quantum of process {} expired", front.pid);
            }
        }

        let Some(entry) = self.ready_queue.front_mut() else {
            return self.table.idle(now);
        };
        entry.quantum -= 1;
        let pid = entry.pid;
        trace!("t={now} rotation {:?}", self.ready_queue.pids());

        self.table.dispatch(pid)?;
        Ok(Run { pid })
    }

    fn exec(&mut self, pid: Pid) -> Result<(), SimError> {
        self.table.exec(pid)
    }

    fn list(&self) -> Vec<&Pcb> {
        self.table.list()
    }
}
