//! A CPU scheduling library.
//!
//! This library provides the process model, the [`Scheduler`] trait and
//! the scheduling policies that a processor simulation drives one time
//! unit at a time.

use std::fmt::{self, Display};
use std::num::NonZeroUsize;

pub mod error;
mod scheduler;

pub use crate::error::{InvalidInput, SimError};
pub use crate::scheduler::{
    Pid, Process, ProcessSet, ProcessState, Scheduler, SchedulingDecision, Ticks,
};
pub use crate::schedulers::{Pcb, QueueEntry, ReadyQueue};

mod schedulers;

use schedulers::{Fcfs, RoundRobin, Srt};

/// Returns a structure that implements the `Scheduler` trait with a first come first served policy
///
/// * `processes` - the batch to simulate.
pub fn fcfs(processes: &ProcessSet) -> impl Scheduler {
    Fcfs::new(processes)
}

/// Returns a structure that implements the `Scheduler` trait with a round robin scheduler policy
///
/// * `processes` - the batch to simulate.
/// * `timeslice` - the time quanta that a process can run before it is preempted
pub fn round_robin(processes: &ProcessSet, timeslice: NonZeroUsize) -> impl Scheduler {
    RoundRobin::new(processes, timeslice)
}

/// Returns a structure that implements the `Scheduler` trait with a preemptive
/// shortest remaining time policy
///
/// * `processes` - the batch to simulate.
pub fn srt(processes: &ProcessSet) -> impl Scheduler {
    Srt::new(processes)
}

/// A scheduling policy together with its parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Policy {
    /// First come first served, non preemptive.
    Fcfs,

    /// Round robin with a fixed time quantum.
    RoundRobin {
        /// The maximum number of consecutive time units of a turn.
        time_quantum: i64,
    },

    /// Shortest remaining time first, preemptive.
    Srt,
}

impl Policy {
    /// Builds the scheduler for `processes`.
    ///
    /// Fails if the policy parameters are invalid.
    pub fn scheduler(&self, processes: &ProcessSet) -> Result<Box<dyn Scheduler>, SimError> {
        let scheduler: Box<dyn Scheduler> = match *self {
            Policy::Fcfs => Box::new(fcfs(processes)),
            Policy::RoundRobin { time_quantum } => {
                let timeslice = usize::try_from(time_quantum)
                    .ok()
                    .and_then(NonZeroUsize::new)
                    .ok_or(InvalidInput::NonPositiveQuantum(time_quantum))?;
                Box::new(round_robin(processes, timeslice))
            }
            Policy::Srt => Box::new(srt(processes)),
        };
        Ok(scheduler)
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "FCFS"),
            Policy::RoundRobin { time_quantum } => {
                write!(f, "Round Robin (quantum {time_quantum})")
            }
            Policy::Srt => write!(f, "SRT"),
        }
    }
}
