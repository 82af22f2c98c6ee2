use log::debug;

use super::table::{Pcb, ProcessTable};
use crate::error::SimError;
use crate::{Pid, ProcessSet, Scheduler, SchedulingDecision, Ticks};

/// Preemptive shortest remaining time first.
///
/// The choice is made again for every time unit. Ties go to the lowest PID.
pub struct Srt {
    table: ProcessTable,
    current: Option<Pid>,
}

impl Srt {
    pub fn new(processes: &ProcessSet) -> Self {
        Srt {
            table: ProcessTable::new(processes),
            current: None,
        }
    }
}

impl Scheduler for Srt {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn next(&mut self, now: Ticks) -> Result<SchedulingDecision, SimError> {
        self.table.admit(now);

        let Some(pid) = self
            .table
            .ready(now)
            .min_by_key(|pcb| (pcb.remaining(), pcb.pid()))
            .map(Pcb::pid)
        else {
            return self.table.idle(now);
        };

        if let Some(current) = self.current.filter(|&current| current != pid) {
            if !self.table.get(current)?.is_complete() {
                debug!("t={now} process {pid} preempts process {current}");
            }
        }
        self.current = Some(pid);

        self.table.dispatch(pid)?;
        Ok(SchedulingDecision::Run { pid })
    }

    fn exec(&mut self, pid: Pid) -> Result<(), SimError> {
        self.table.exec(pid)
    }

    fn list(&self) -> Vec<&Pcb> {
        self.table.list()
    }
}
