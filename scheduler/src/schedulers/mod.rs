//! The scheduling policies.
//!
//! Each policy owns a process table with the runtime
//! state of every process for the length of one run.

mod table;
pub use table::Pcb;

mod ready_queue;
pub use ready_queue::{QueueEntry, ReadyQueue};

mod fcfs;
pub use fcfs::Fcfs;

mod round_robin;
pub use round_robin::RoundRobin;

mod srt;
pub use srt::Srt;
