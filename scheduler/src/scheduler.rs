use std::fmt::{self, Display};
use std::num::NonZeroUsize;

use crate::error::{InvalidInput, SimError};
use crate::schedulers::Pcb;

/// A point on the simulated clock, or a duration measured in time units.
pub type Ticks = usize;

/// The PID of a process
///
/// PIDs start from 0 and follow the order in which the processes were given.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Pid(usize);

impl Pid {
    pub fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    /// The position of the process in its [`ProcessSet`].
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A process of the simulated batch.
///
/// Processes never change once the [`ProcessSet`] has been built.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Process {
    pid: Pid,
    arrival_time: Ticks,
    burst_time: NonZeroUsize,
}

impl Process {
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// The clock time at which the process becomes eligible to run.
    pub fn arrival_time(&self) -> Ticks {
        self.arrival_time
    }

    /// The total amount of CPU time the process needs.
    pub fn burst_time(&self) -> Ticks {
        self.burst_time.get()
    }
}

/// The immutable batch of processes a simulation runs over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSet {
    processes: Vec<Process>,
}

impl ProcessSet {
    /// Builds a process set from the raw values produced by an input parser.
    ///
    /// * `burst_times` - the CPU time each process needs, in input order.
    /// * `arrival_times` - the arrival time of each process, in the same order.
    ///
    /// The PID of every process is its position in the input.
    pub fn new(burst_times: &[i64], arrival_times: &[i64]) -> Result<ProcessSet, SimError> {
        if burst_times.is_empty() {
            return Err(InvalidInput::Empty.into());
        }
        if burst_times.len() != arrival_times.len() {
            return Err(InvalidInput::LengthMismatch {
                bursts: burst_times.len(),
                arrivals: arrival_times.len(),
            }
            .into());
        }

        let mut processes = Vec::with_capacity(burst_times.len());
        for (index, (&burst, &arrival)) in burst_times.iter().zip(arrival_times).enumerate() {
            let pid = Pid::new(index);
            let burst_time = usize::try_from(burst)
                .ok()
                .and_then(NonZeroUsize::new)
                .ok_or(InvalidInput::NonPositiveBurst { pid, burst })?;
            let arrival_time = usize::try_from(arrival)
                .map_err(|_| InvalidInput::NegativeArrival { pid, arrival })?;
            processes.push(Process {
                pid,
                arrival_time,
                burst_time,
            });
        }

        Ok(ProcessSet { processes })
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Always `false`, a process set holds at least one process.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.processes.get(pid.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    /// The sum of all burst times, the time the CPU has to be busy.
    pub fn total_burst_time(&self) -> Ticks {
        self.processes.iter().map(Process::burst_time).sum()
    }
}

impl<'a> IntoIterator for &'a ProcessSet {
    type Item = &'a Process;
    type IntoIter = std::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}

/// The action that the scheduler asks the processor to take.
///
/// This is returned by the [`Scheduler::next`] function.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SchedulingDecision {
    /// Run the process with PID `pid` for one time unit.
    Run { pid: Pid },

    /// No process is ready, idle the amount of specified time units.
    Sleep(NonZeroUsize),

    /// Every process has executed its whole burst.
    Done,
}

impl Display for SchedulingDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingDecision::Run { pid } => {
                write!(f, "Run {}", pid)
            }
            SchedulingDecision::Sleep(amount) => {
                write!(f, "Sleep for {} units", amount)
            }
            SchedulingDecision::Done => {
                write!(f, "Done, no more processes")
            }
        }
    }
}

/// The trait that any scheduling policy has to implement.
///
/// A scheduler owns the runtime state of every process for the duration of a
/// single run and is driven one decision at a time by the processor.
pub trait Scheduler: Send {
    /// A human readable name of the policy.
    fn name(&self) -> &'static str;

    /// Returns the action that the processor has to perform next.
    ///
    /// * `now` - the current clock, before any context switch is paid.
    fn next(&mut self, now: Ticks) -> Result<SchedulingDecision, SimError>;

    /// The scheduler is informed that `pid` has executed for one time unit.
    fn exec(&mut self, pid: Pid) -> Result<(), SimError>;

    /// Returns the runtime state of every process.
    fn list(&self) -> Vec<&Pcb>;
}

/// The state of a process.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// The process has not arrived yet.
    Waiting,

    /// The process has arrived and can be scheduled.
    Ready,

    /// The process was selected by the last decision.
    Running,

    /// The process has executed its whole burst.
    Completed,
}

impl Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::Waiting => write!(f, "WAITING"),
            ProcessState::Ready => write!(f, "READY"),
            ProcessState::Running => write!(f, "RUNNING"),
            ProcessState::Completed => write!(f, "COMPLETED"),
        }
    }
}
