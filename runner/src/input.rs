//! Reader for the `process.txt` input format.
//!
//! ```text
//! 5, 3, 8      burst times
//! 0, 1, 2      arrival times
//! 0            context switch duration
//! 3            number of processes
//! 2            time quantum, optional, round robin only
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use scheduler::{ProcessSet, SimError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub burst_times: Vec<i64>,
    pub arrival_times: Vec<i64>,
    pub context_switch: i64,
    pub time_quantum: Option<i64>,
}

impl Input {
    pub fn processes(&self) -> Result<ProcessSet, SimError> {
        ProcessSet::new(&self.burst_times, &self.arrival_times)
    }
}

pub fn read(path: &Path) -> Result<Input> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse(&text).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn parse(text: &str) -> Result<Input> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    let mut next_line = |what: &str| {
        lines
            .next()
            .with_context(|| format!("missing line with the {what}"))
    };

    let burst_times = parse_list(next_line("burst times")?).context("invalid burst times")?;
    let arrival_times =
        parse_list(next_line("arrival times")?).context("invalid arrival times")?;
    let context_switch = next_line("context switch duration")?
        .parse::<i64>()
        .context("invalid context switch duration")?;
    let process_count = next_line("number of processes")?
        .parse::<usize>()
        .context("invalid number of processes")?;
    let time_quantum = match lines.next() {
        Some(line) => Some(line.parse::<i64>().context("invalid time quantum")?),
        None => None,
    };

    if process_count != burst_times.len() {
        bail!(
            "{} processes declared but {} burst times given",
            process_count,
            burst_times.len()
        );
    }

    Ok(Input {
        burst_times,
        arrival_times,
        context_switch,
        time_quantum,
    })
}

fn parse_list(line: &str) -> Result<Vec<i64>> {
    line.split(',')
        .map(str::trim)
        .map(|value| {
            value
                .parse::<i64>()
                .with_context(|| format!("`{value}` is not an integer"))
        })
        .collect()
}
