pub mod profiling;
pub mod rewards;
