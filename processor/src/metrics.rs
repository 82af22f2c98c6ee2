//! Scheduling performance metrics derived from an [`ExecutionTrace`].

use std::fmt::{self, Display};

use scheduler::{InvalidInput, Pid, ProcessSet, SimError, Ticks};

use crate::ExecutionTrace;

/// The metrics of a single process.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,

    /// The time right after the last unit the process executed.
    pub exit_time: Ticks,

    /// `exit_time - arrival_time`
    pub turnaround_time: i64,

    /// `turnaround_time - burst_time`
    pub waiting_time: i64,
}

/// The metrics of a whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Per process metrics, in PID order.
    pub processes: Vec<ProcessMetrics>,
    pub average_turnaround_time: f64,
    pub average_waiting_time: f64,

    /// The sum of all burst times.
    pub total_busy_time: Ticks,

    /// The latest exit time plus one context switch for every process but
    /// the first, whatever the number of switches the policy performed.
    pub total_elapsed_time: Ticks,

    /// `100 * total_busy_time / total_elapsed_time`
    pub cpu_utilization: f64,
}

impl Metrics {
    pub fn process(&self, pid: Pid) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|metrics| metrics.pid == pid)
    }

    pub fn exit_times(&self) -> Vec<Ticks> {
        self.processes.iter().map(|metrics| metrics.exit_time).collect()
    }

    pub fn turnaround_times(&self) -> Vec<i64> {
        self.processes
            .iter()
            .map(|metrics| metrics.turnaround_time)
            .collect()
    }

    pub fn waiting_times(&self) -> Vec<i64> {
        self.processes
            .iter()
            .map(|metrics| metrics.waiting_time)
            .collect()
    }
}

/// Computes the metrics of a run.
///
/// * `processes` - the simulated batch.
/// * `trace` - the trace the run produced for `processes`.
/// * `context_switch` - the context switch duration the run used.
pub fn compute(
    processes: &ProcessSet,
    trace: &ExecutionTrace,
    context_switch: Ticks,
) -> Result<Metrics, SimError> {
    let mut per_process = Vec::with_capacity(processes.len());
    for process in processes {
        let pid = process.pid();
        let last_unit = trace.last_unit(pid).ok_or_else(|| {
            SimError::Invariant(format!("process {pid} never executed"))
        })?;

        let exit_time = last_unit
            .checked_add(1)
            .ok_or(InvalidInput::TimeOverflow)?;
        let turnaround_time = signed(exit_time)?
            .checked_sub(signed(process.arrival_time())?)
            .ok_or(InvalidInput::TimeOverflow)?;
        let waiting_time = turnaround_time
            .checked_sub(signed(process.burst_time())?)
            .ok_or(InvalidInput::TimeOverflow)?;
        per_process.push(ProcessMetrics {
            pid,
            arrival_time: process.arrival_time(),
            burst_time: process.burst_time(),
            exit_time,
            turnaround_time,
            waiting_time,
        });
    }

    let count = per_process.len() as f64;
    let average_turnaround_time = per_process
        .iter()
        .map(|metrics| metrics.turnaround_time as f64)
        .sum::<f64>()
        / count;
    let average_waiting_time = per_process
        .iter()
        .map(|metrics| metrics.waiting_time as f64)
        .sum::<f64>()
        / count;

    let total_busy_time = processes.total_burst_time();
    let last_exit = per_process
        .iter()
        .map(|metrics| metrics.exit_time)
        .max()
        .unwrap_or(0);
    let total_elapsed_time = context_switch
        .checked_mul(processes.len().saturating_sub(1))
        .and_then(|switches| switches.checked_add(last_exit))
        .ok_or(InvalidInput::TimeOverflow)?;
    if total_elapsed_time == 0 {
        return Err(SimError::DivisionByZero);
    }
    let cpu_utilization = 100.0 * total_busy_time as f64 / total_elapsed_time as f64;

    Ok(Metrics {
        processes: per_process,
        average_turnaround_time,
        average_waiting_time,
        total_busy_time,
        total_elapsed_time,
        cpu_utilization,
    })
}

fn signed(time: Ticks) -> Result<i64, SimError> {
    i64::try_from(time).map_err(|_| InvalidInput::TimeOverflow.into())
}

impl Display for ProcessMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t\t{}",
            self.pid,
            self.arrival_time,
            self.burst_time,
            self.exit_time,
            self.turnaround_time,
            self.waiting_time
        )
    }
}

impl Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PID\tARRIVAL\tBURST\tEXIT\tTURNAROUND\tWAITING")?;
        for metrics in &self.processes {
            writeln!(f, "{}", metrics)?;
        }
        writeln!(f)?;
        writeln!(f, "Average turnaround time: {:.2}", self.average_turnaround_time)?;
        writeln!(f, "Average waiting time: {:.2}", self.average_waiting_time)?;
        writeln!(f, "Total busy time: {}", self.total_busy_time)?;
        writeln!(f, "Total elapsed time: {}", self.total_elapsed_time)?;
        writeln!(f, "CPU Utilization: {:.2}%", self.cpu_utilization)
    }
}
