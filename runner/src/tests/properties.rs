use pretty_assertions::assert_eq;
use processor::{metrics, simulate, ExecutionTrace};
use scheduler::{Pid, Policy, ProcessSet};

use super::{policies, processes, WORKLOADS};

fn every_run() -> Vec<(ProcessSet, Policy, i64, ExecutionTrace)> {
    let mut runs = Vec::new();
    for (burst_times, arrival_times) in WORKLOADS {
        let processes = processes(burst_times, arrival_times);
        for policy in policies() {
            for context_switch in [0, 2] {
                let trace = simulate(policy, &processes, context_switch).unwrap();
                runs.push((processes.clone(), policy, context_switch, trace));
            }
        }
    }
    runs
}

#[test]
pub fn conservation() {
    for (processes, policy, _, trace) in every_run() {
        for process in &processes {
            assert_eq!(
                trace.count(process.pid()),
                process.burst_time(),
                "{policy}: process {}",
                process.pid()
            );
        }
        assert_eq!(trace.len(), processes.total_burst_time());
    }
}

#[test]
pub fn strictly_increasing_time() {
    for (_, policy, _, trace) in every_run() {
        for pair in trace.entries().windows(2) {
            assert!(
                pair[0].time < pair[1].time,
                "{policy}: unit {} recorded after {}",
                pair[1].time,
                pair[0].time
            );
        }
    }
}

#[test]
pub fn non_negative_waiting() {
    for (processes, policy, context_switch, trace) in every_run() {
        let metrics = metrics::compute(&processes, &trace, context_switch as usize).unwrap();
        for process in &metrics.processes {
            assert!(process.waiting_time >= 0, "{policy}: {process:?}");
            assert!(
                process.turnaround_time >= process.burst_time as i64,
                "{policy}: {process:?}"
            );
        }
    }
}

#[test]
pub fn single_process() {
    let processes = processes(&[4], &[0]);

    let traces: Vec<ExecutionTrace> = policies()
        .into_iter()
        .map(|policy| simulate(policy, &processes, 5).unwrap())
        .collect();

    for trace in &traces {
        assert_eq!(trace, &traces[0]);
        let metrics = metrics::compute(&processes, trace, 5).unwrap();
        assert_eq!(metrics.waiting_times(), vec![0]);
        assert_eq!(metrics.cpu_utilization, 100.0);
    }
}

#[test]
pub fn round_robin_quantum_bound() {
    for (processes, policy, _, trace) in every_run() {
        let Policy::RoundRobin { time_quantum } = policy else {
            continue;
        };

        // consecutive entries of the same process form one turn
        let entries = trace.entries();
        let mut start = 0;
        while start < entries.len() {
            let pid = entries[start].pid;
            let end = entries[start..]
                .iter()
                .position(|entry| entry.pid != pid)
                .map_or(entries.len(), |offset| start + offset);
            let turn_start = entries[start].time;

            // another process was ready when the turn began
            let contended = processes.iter().any(|process| {
                process.pid() != pid
                    && process.arrival_time() <= turn_start
                    && trace.last_unit(process.pid()).unwrap() > turn_start
            });
            if contended {
                assert!(
                    end - start <= time_quantum as usize,
                    "{policy}: process {pid} ran {} units from {turn_start}",
                    end - start
                );
            }
            start = end;
        }
    }
}

#[test]
pub fn srt_waits_no_longer_than_fcfs() {
    for (burst_times, arrival_times) in WORKLOADS {
        let processes = processes(burst_times, arrival_times);
        let average_waiting_time = |policy| {
            let trace = simulate(policy, &processes, 0).unwrap();
            metrics::compute(&processes, &trace, 0)
                .unwrap()
                .average_waiting_time
        };

        let srt = average_waiting_time(Policy::Srt);
        let fcfs = average_waiting_time(Policy::Fcfs);
        assert!(srt <= fcfs, "{burst_times:?}: SRT {srt} > FCFS {fcfs}");
    }
}

#[test]
pub fn pids_are_stable() {
    // FCFS reorders the execution, never the PIDs
    let processes = processes(&[1, 2], &[1, 0]);
    let trace = simulate(Policy::Fcfs, &processes, 0).unwrap();

    assert_eq!(trace.entries()[0].pid, Pid::new(1));
    assert_eq!(trace.units(Pid::new(0)).collect::<Vec<_>>(), vec![2]);
}
