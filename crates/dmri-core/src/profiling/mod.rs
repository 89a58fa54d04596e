//! Runtime instrumentation: wall-clock timing and resident memory.

pub mod memory;
pub mod timing;

// Re-export commonly used types
pub use memory::{
    default_probe, memory_usage, memory_usage_with, MemoryProbe, ProcStatusProbe,
    UnavailableProbe,
};
pub use timing::{
    time_operation, time_operation_with, timed, timed_with, InMemorySink, LogSink, TimingSink,
    TimingStats,
};
