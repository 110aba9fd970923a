//! Database enumerations.

mod task_priority;

pub use task_priority::TaskPriority;
