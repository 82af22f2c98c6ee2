use processor::{format_trace, metrics, simulate, ExecutionTrace, Metrics};
use scheduler::{Policy, ProcessSet};

mod invalid;
mod properties;

/// The inputs used throughout the test-suite, as (burst times, arrival times).
///
/// Arrivals are ordered so that FCFS never dispatches a process early.
const WORKLOADS: &[(&[i64], &[i64])] = &[
    (&[5, 3, 8], &[0, 1, 2]),
    (&[4, 1, 2, 6], &[0, 0, 3, 3]),
    (&[1, 2, 3, 4, 5], &[0, 1, 2, 3, 4]),
    (&[6, 2, 8, 3, 4], &[0, 2, 1, 3, 2]),
    (&[3, 3, 3], &[0, 0, 0]),
];

fn processes(burst_times: &[i64], arrival_times: &[i64]) -> ProcessSet {
    ProcessSet::new(burst_times, arrival_times).unwrap()
}

fn policies() -> Vec<Policy> {
    vec![
        Policy::Fcfs,
        Policy::RoundRobin { time_quantum: 1 },
        Policy::RoundRobin { time_quantum: 2 },
        Policy::RoundRobin { time_quantum: 3 },
        Policy::Srt,
    ]
}

/// Simulates `processes` and compares the rendered trace with `expected`.
fn run(
    name: &str,
    policy: Policy,
    processes: &ProcessSet,
    context_switch: i64,
    expected: &str,
) -> (ExecutionTrace, Metrics) {
    let trace = simulate(policy, processes, context_switch).unwrap();
    let output = format_trace(&trace, processes);

    println!("\n{name} ({policy})\nleft = Correct Output\nright = Your Output\n");
    use pretty_assertions::assert_eq;
    assert_eq!(expected, output);

    let metrics = metrics::compute(processes, &trace, context_switch as usize).unwrap();
    (trace, metrics)
}
