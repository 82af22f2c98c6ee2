use std::fmt::{self, Display};

use crate::Pid;

/// The reason an input was rejected before a simulation could start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    /// No process was given.
    Empty,

    /// The burst and arrival lists do not describe the same processes.
    LengthMismatch { bursts: usize, arrivals: usize },

    /// A process asks for no CPU time at all.
    NonPositiveBurst { pid: Pid, burst: i64 },

    /// A process arrives before the simulation starts.
    NegativeArrival { pid: Pid, arrival: i64 },

    /// The round robin time quantum is zero or negative.
    NonPositiveQuantum(i64),

    /// The context switch duration is negative.
    NegativeContextSwitch(i64),

    /// The durations are too long for the simulated clock.
    TimeOverflow,
}

impl Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::Empty => write!(f, "the process set is empty"),
            InvalidInput::LengthMismatch { bursts, arrivals } => {
                write!(f, "{bursts} burst times but {arrivals} arrival times")
            }
            InvalidInput::NonPositiveBurst { pid, burst } => {
                write!(f, "process {pid} has a non positive burst time ({burst})")
            }
            InvalidInput::NegativeArrival { pid, arrival } => {
                write!(f, "process {pid} has a negative arrival time ({arrival})")
            }
            InvalidInput::NonPositiveQuantum(quantum) => {
                write!(f, "the time quantum must be positive, got {quantum}")
            }
            InvalidInput::NegativeContextSwitch(duration) => {
                write!(f, "the context switch duration must not be negative, got {duration}")
            }
            InvalidInput::TimeOverflow => {
                write!(f, "the simulated time overflows, the durations are too long")
            }
        }
    }
}

/// Errors returned by the scheduling and metrics operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The input was rejected, either upfront or because the run it describes
    /// does not fit in the simulated clock.
    InvalidInput(InvalidInput),

    /// The elapsed time of a run is zero, the CPU utilization is undefined.
    DivisionByZero,

    /// The simulation reached a state that a correct scheduler never produces.
    Invariant(String),
}

impl Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidInput(reason) => write!(f, "invalid input: {reason}"),
            SimError::DivisionByZero => {
                write!(f, "division by zero, the total elapsed time is 0")
            }
            SimError::Invariant(message) => write!(f, "invariant violated: {message}"),
        }
    }
}

impl std::error::Error for InvalidInput {}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::InvalidInput(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<InvalidInput> for SimError {
    fn from(reason: InvalidInput) -> Self {
        SimError::InvalidInput(reason)
    }
}
