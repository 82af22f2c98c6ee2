use pretty_assertions::assert_eq;
use processor::{metrics, simulate, ExecutionTrace, Processor};
use scheduler::{
    InvalidInput, Pcb, Pid, Policy, ProcessSet, Scheduler, SchedulingDecision, SimError, Ticks,
};

use super::{policies, processes};

fn simulate_raw(
    policy: Policy,
    burst_times: &[i64],
    arrival_times: &[i64],
    context_switch: i64,
) -> Result<ExecutionTrace, SimError> {
    let processes = ProcessSet::new(burst_times, arrival_times)?;
    simulate(policy, &processes, context_switch)
}

#[test]
pub fn mismatched_lengths() {
    for policy in policies() {
        assert_eq!(
            simulate_raw(policy, &[5, 3, 8], &[0, 1], 0),
            Err(SimError::InvalidInput(InvalidInput::LengthMismatch {
                bursts: 3,
                arrivals: 2
            }))
        );
    }
}

#[test]
pub fn zero_burst() {
    for policy in policies() {
        assert_eq!(
            simulate_raw(policy, &[5, 0, 8], &[0, 1, 2], 0),
            Err(SimError::InvalidInput(InvalidInput::NonPositiveBurst {
                pid: Pid::new(1),
                burst: 0
            }))
        );
    }
}

#[test]
pub fn empty_and_negative() {
    assert_eq!(
        ProcessSet::new(&[], &[]),
        Err(SimError::InvalidInput(InvalidInput::Empty))
    );
    assert_eq!(
        ProcessSet::new(&[-2], &[0]),
        Err(SimError::InvalidInput(InvalidInput::NonPositiveBurst {
            pid: Pid::new(0),
            burst: -2
        }))
    );
    assert_eq!(
        ProcessSet::new(&[2, 2], &[0, -1]),
        Err(SimError::InvalidInput(InvalidInput::NegativeArrival {
            pid: Pid::new(1),
            arrival: -1
        }))
    );
}

#[test]
pub fn non_positive_quantum() {
    let processes = processes(&[5, 3, 8], &[0, 1, 2]);

    for time_quantum in [0, -3] {
        assert_eq!(
            simulate(Policy::RoundRobin { time_quantum }, &processes, 0),
            Err(SimError::InvalidInput(InvalidInput::NonPositiveQuantum(
                time_quantum
            )))
        );
    }
}

#[test]
pub fn negative_context_switch() {
    let processes = processes(&[5, 3, 8], &[0, 1, 2]);

    for policy in policies() {
        assert_eq!(
            simulate(policy, &processes, -1),
            Err(SimError::InvalidInput(InvalidInput::NegativeContextSwitch(-1)))
        );
    }
}

#[test]
pub fn clock_overflow() {
    // the second context switch no longer fits in the clock
    for policy in policies() {
        assert_eq!(
            simulate_raw(policy, &[1, 1, 1], &[0, 0, 0], i64::MAX),
            Err(SimError::InvalidInput(InvalidInput::TimeOverflow))
        );
    }

    let processes = processes(&[1, 1], &[0, 0]);
    let mut scheduler = Policy::Fcfs.scheduler(&processes).unwrap();
    assert_eq!(
        Processor::run(scheduler.as_mut(), Ticks::MAX),
        Err(SimError::InvalidInput(InvalidInput::TimeOverflow))
    );
}

#[test]
pub fn elapsed_time_overflow() {
    let processes = processes(&[1, 1], &[0, 0]);
    let mut trace = ExecutionTrace::new();
    trace.push(0, Pid::new(0)).unwrap();
    trace.push(1, Pid::new(1)).unwrap();

    assert_eq!(
        metrics::compute(&processes, &trace, Ticks::MAX),
        Err(SimError::InvalidInput(InvalidInput::TimeOverflow))
    );
    assert_eq!(
        metrics::compute(&processes, &trace, i64::MAX as Ticks)
            .unwrap()
            .total_elapsed_time,
        2 + i64::MAX as Ticks
    );
}

#[test]
pub fn exit_time_overflow() {
    let processes = processes(&[1], &[0]);

    for last_unit in [i64::MAX as Ticks, Ticks::MAX] {
        let mut trace = ExecutionTrace::new();
        trace.push(last_unit, Pid::new(0)).unwrap();

        assert_eq!(
            metrics::compute(&processes, &trace, 0),
            Err(SimError::InvalidInput(InvalidInput::TimeOverflow))
        );
    }
}

/// Keeps scheduling the last process once the wrapped scheduler is done.
struct Replay {
    inner: Box<dyn Scheduler>,
    last: Option<Pid>,
}

impl Scheduler for Replay {
    fn name(&self) -> &'static str {
        "Replay"
    }

    fn next(&mut self, now: Ticks) -> Result<SchedulingDecision, SimError> {
        match self.inner.next(now)? {
            SchedulingDecision::Run { pid } => {
                self.last = Some(pid);
                Ok(SchedulingDecision::Run { pid })
            }
            SchedulingDecision::Done => Ok(match self.last {
                Some(pid) => SchedulingDecision::Run { pid },
                None => SchedulingDecision::Done,
            }),
            decision => Ok(decision),
        }
    }

    fn exec(&mut self, pid: Pid) -> Result<(), SimError> {
        self.inner.exec(pid)
    }

    fn list(&self) -> Vec<&Pcb> {
        self.inner.list()
    }
}

/// Gives up before any process ran.
struct Quitter(Box<dyn Scheduler>);

impl Scheduler for Quitter {
    fn name(&self) -> &'static str {
        "Quitter"
    }

    fn next(&mut self, _now: Ticks) -> Result<SchedulingDecision, SimError> {
        Ok(SchedulingDecision::Done)
    }

    fn exec(&mut self, pid: Pid) -> Result<(), SimError> {
        self.0.exec(pid)
    }

    fn list(&self) -> Vec<&Pcb> {
        self.0.list()
    }
}

#[test]
pub fn completed_process_selected() {
    let processes = processes(&[2, 1], &[0, 0]);
    let mut scheduler = Replay {
        inner: Policy::Srt.scheduler(&processes).unwrap(),
        last: None,
    };

    let result = Processor::run(&mut scheduler, 0);

    assert!(matches!(result, Err(SimError::Invariant(_))), "{result:?}");
}

#[test]
pub fn unfinished_run() {
    let processes = processes(&[2, 1], &[0, 0]);
    let mut scheduler = Quitter(Policy::Fcfs.scheduler(&processes).unwrap());

    let result = Processor::run(&mut scheduler, 0);

    assert_eq!(
        result,
        Err(SimError::Invariant(
            "scheduler finished after 0 of 3 units".to_string()
        ))
    );
}
