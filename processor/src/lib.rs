//! A processor simulation library
//!
//! This is used for simulating schedulers from the [`scheduler`] crate on a
//! single CPU, one time unit at a time.

use log::{debug, info, trace};
use scheduler::{
    InvalidInput, Pid, Policy, ProcessSet, Scheduler, SchedulingDecision, SimError, Ticks,
};

pub mod metrics;
mod trace;

pub use metrics::{Metrics, ProcessMetrics};
pub use trace::{ExecutionTrace, Segment, TraceEntry};

/// The processor simulator.
pub struct Processor<'a, S: Scheduler + ?Sized> {
    scheduler: &'a mut S,
    context_switch: Ticks,
    clock: Ticks,
    current_process: Option<Pid>,
    context_switches: usize,
    budget: Ticks,
    trace: ExecutionTrace,
}

impl<'a, S: Scheduler + ?Sized> Processor<'a, S> {
    /// Runs a simulation to completion.
    ///
    /// * `scheduler` - the scheduler to use for the simulation.
    /// * `context_switch` - the time units paid every time the CPU moves
    ///                      from one process to another.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    /// use scheduler::ProcessSet;
    /// use std::num::NonZeroUsize;
    ///
    /// let processes = ProcessSet::new(&[5, 3, 8], &[0, 1, 2]).unwrap();
    /// let mut scheduler = scheduler::round_robin(&processes, NonZeroUsize::new(2).unwrap());
    /// let trace = Processor::run(&mut scheduler, 0).unwrap();
    ///
    /// assert_eq!(trace.len(), 16);
    /// ```
    pub fn run(scheduler: &'a mut S, context_switch: Ticks) -> Result<ExecutionTrace, SimError> {
        let budget = scheduler.list().iter().map(|pcb| pcb.remaining()).sum();
        let mut processor = Processor {
            scheduler,
            context_switch,
            clock: 0,
            current_process: None,
            context_switches: 0,
            budget,
            trace: ExecutionTrace::new(),
        };

        while processor.step()? {}

        info!(
            "{}: {} units executed, {} context switches, clock stopped at {}",
            processor.scheduler.name(),
            processor.trace.len(),
            processor.context_switches,
            processor.clock
        );
        Ok(processor.trace)
    }

    // Returns false once the scheduler is done
    fn step(&mut self) -> Result<bool, SimError> {
        let decision = self.scheduler.next(self.clock)?;
        debug!("t={} {}", self.clock, decision);

        match decision {
            SchedulingDecision::Run { pid } => {
                if self.trace.len() == self.budget {
                    return Err(SimError::Invariant(format!(
                        "process {pid} scheduled after every burst was executed"
                    )));
                }
                self.switch_to(pid)?;
                self.scheduler.exec(pid)?;
                self.trace.push(self.clock, pid)?;
                self.advance(1)?;
                for pcb in self.scheduler.list() {
                    trace!(
                        "{}\t{}\t{}/{}",
                        pcb.pid(),
                        pcb.state(),
                        pcb.executed(),
                        pcb.burst_time()
                    );
                }
                Ok(true)
            }
            SchedulingDecision::Sleep(time) => {
                self.advance(time.get())?;
                Ok(true)
            }
            SchedulingDecision::Done => {
                if self.trace.len() != self.budget {
                    return Err(SimError::Invariant(format!(
                        "scheduler finished after {} of {} units",
                        self.trace.len(),
                        self.budget
                    )));
                }
                Ok(false)
            }
        }
    }

    fn switch_to(&mut self, pid: Pid) -> Result<(), SimError> {
        match self.current_process {
            Some(previous) if previous != pid => {
                debug!(
                    "t={} context switch {} -> {}",
                    self.clock, previous, pid
                );
                self.advance(self.context_switch)?;
                self.context_switches += 1;
            }
            _ => {}
        }
        self.current_process = Some(pid);
        Ok(())
    }

    fn advance(&mut self, time: Ticks) -> Result<(), SimError> {
        self.clock = self
            .clock
            .checked_add(time)
            .ok_or(InvalidInput::TimeOverflow)?;
        Ok(())
    }
}

/// Validates a raw context switch duration.
pub fn context_switch_duration(context_switch: i64) -> Result<Ticks, SimError> {
    Ticks::try_from(context_switch)
        .map_err(|_| InvalidInput::NegativeContextSwitch(context_switch).into())
}

/// Simulates `processes` under `policy`.
///
/// Every input is validated before the simulation starts.
pub fn simulate(
    policy: Policy,
    processes: &ProcessSet,
    context_switch: i64,
) -> Result<ExecutionTrace, SimError> {
    let context_switch = context_switch_duration(context_switch)?;
    let mut scheduler = policy.scheduler(processes)?;
    Processor::run(scheduler.as_mut(), context_switch)
}

/// Format an [`ExecutionTrace`] to a [`String`], one line per process with
/// the time units it executed.
///
/// * `trace` - the trace returned by the [`Processor`].
/// * `processes` - the processes of the run.
///
/// ## Example
///
/// ```rust
/// use processor::{format_trace, simulate};
/// use scheduler::{Policy, ProcessSet};
///
/// let processes = ProcessSet::new(&[2, 1], &[0, 0]).unwrap();
/// let trace = simulate(Policy::Fcfs, &processes, 0).unwrap();
///
/// assert_eq!(format_trace(&trace, &processes), "PID\tUNITS\n0\t0 1\n1\t2\n");
/// ```
pub fn format_trace(trace: &ExecutionTrace, processes: &ProcessSet) -> String {
    let mut s = String::new();
    s.push_str("PID\tUNITS\n");
    for process in processes {
        let units = trace
            .units(process.pid())
            .map(|unit| unit.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        s.push_str(&format!("{}\t{}\n", process.pid(), units));
    }
    s
}
