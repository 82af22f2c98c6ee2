use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::warn;

use processor::{format_trace, metrics, simulate, Metrics};
use scheduler::{Policy, ProcessSet, SimError};

mod input;

/// Scheduling policy options
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
enum PolicyArg {
    /// First come first served
    Fcfs,
    /// Round robin, needs a time quantum
    Rr,
    /// Shortest remaining time first
    Srt,
    /// Run every policy and compare them
    All,
}

/// CPU scheduling simulation over a batch of processes
#[derive(Parser, Debug)]
#[command(name = "runner")]
#[command(about = "Simulate CPU scheduling policies", long_about = None)]
struct Args {
    /// The process description file
    #[arg(short, long, env = "PROCESS_FILE", default_value = "process.txt")]
    input: PathBuf,

    /// Scheduling policy to use
    #[arg(short, long, value_enum, env = "POLICY", default_value_t = PolicyArg::All)]
    policy: PolicyArg,

    /// Round robin time quantum, overrides the input file
    #[arg(short, long, env = "TIMESLICE", allow_hyphen_values = true)]
    quantum: Option<i64>,

    /// Context switch duration, overrides the input file
    #[arg(short, long, env = "CONTEXT_SWITCH", allow_hyphen_values = true)]
    context_switch: Option<i64>,
}

/// The outcome of simulating one policy.
pub struct Report {
    pub policy: Policy,
    pub trace: String,
    pub segments: String,
    pub metrics: Metrics,
}

impl Report {
    pub fn new(policy: Policy, processes: &ProcessSet, context_switch: i64) -> Result<Report, SimError> {
        let trace = simulate(policy, processes, context_switch)?;
        let metrics = metrics::compute(
            processes,
            &trace,
            processor::context_switch_duration(context_switch)?,
        )?;
        Ok(Report {
            policy,
            trace: format_trace(&trace, processes),
            segments: trace.to_string(),
            metrics,
        })
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===== {} =====", self.policy)?;
        writeln!(f, "{}", self.trace)?;
        writeln!(f, "{}", self.segments)?;
        write!(f, "{}", self.metrics)
    }
}

/// Formats a side by side summary of several reports.
pub fn format_comparison(reports: &[Report]) -> String {
    let mut s = String::from("POLICY\t\t\t\tTURNAROUND\tWAITING\tCPU\n");
    for report in reports {
        s.push_str(&format!(
            "{:<24}\t{:.2}\t\t{:.2}\t{:.2}%\n",
            report.policy.to_string(),
            report.metrics.average_turnaround_time,
            report.metrics.average_waiting_time,
            report.metrics.cpu_utilization
        ));
    }
    s
}

fn policies(policy: PolicyArg, time_quantum: Option<i64>) -> Result<Vec<Policy>> {
    Ok(match (policy, time_quantum) {
        (PolicyArg::Fcfs, _) => vec![Policy::Fcfs],
        (PolicyArg::Srt, _) => vec![Policy::Srt],
        (PolicyArg::Rr, Some(time_quantum)) => vec![Policy::RoundRobin { time_quantum }],
        (PolicyArg::Rr, None) => bail!("round robin needs a time quantum"),
        (PolicyArg::All, Some(time_quantum)) => vec![
            Policy::Fcfs,
            Policy::RoundRobin { time_quantum },
            Policy::Srt,
        ],
        (PolicyArg::All, None) => {
            warn!("no time quantum given, skipping round robin");
            vec![Policy::Fcfs, Policy::Srt]
        }
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut input = input::read(&args.input)?;
    if let Some(time_quantum) = args.quantum {
        input.time_quantum = Some(time_quantum);
    }
    if let Some(context_switch) = args.context_switch {
        input.context_switch = context_switch;
    }

    let processes = input.processes().context("invalid process set")?;
    let mut reports = Vec::new();
    for policy in policies(args.policy, input.time_quantum)? {
        let report = Report::new(policy, &processes, input.context_switch)
            .with_context(|| format!("{policy} simulation failed"))?;
        println!("{report}");
        reports.push(report);
    }

    if reports.len() > 1 {
        println!("{}", format_comparison(&reports));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
