use log::{debug, warn};

use super::table::{Pcb, ProcessTable};
use crate::error::SimError;
use crate::{Pid, Process, ProcessSet, Scheduler, SchedulingDecision, Ticks};

/// First come first served.
///
/// Processes run to completion in arrival order. The order is fixed before
/// the run starts and a process is dispatched when its turn comes even if
/// the clock has not reached its arrival time yet, the CPU never idles.
pub struct Fcfs {
    table: ProcessTable,
    order: Vec<Pid>,
    position: usize,
}

impl Fcfs {
    pub fn new(processes: &ProcessSet) -> Self {
        let mut order: Vec<&Process> = processes.iter().collect();
        // stable, equal arrivals keep their input order
        order.sort_by_key(|process| process.arrival_time());

        Fcfs {
            table: ProcessTable::new(processes),
            order: order.into_iter().map(Process::pid).collect(),
            position: 0,
        }
    }
}

impl Scheduler for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn next(&mut self, now: Ticks) -> Result<SchedulingDecision, SimError> {
        self.table.admit(now);

        while let Some(&pid) = self.order.get(self.position) {
            let pcb = self.table.get(pid)?;
            if !pcb.is_complete() {
                if pcb.arrival_time() > now {
                    warn!(
                        "t={now} process {pid} dispatched before its arrival at {}",
                        pcb.arrival_time()
                    );
                }
                self.table.dispatch(pid)?;
                return Ok(SchedulingDecision::Run { pid });
            }
            self.position += 1;
            debug!("t={now} process {pid} completed");
        }

        Ok(SchedulingDecision::Done)
    }

    fn exec(&mut self, pid: Pid) -> Result<(), SimError> {
        self.table.exec(pid)
    }

    fn list(&self) -> Vec<&Pcb> {
        self.table.list()
    }
}
