//! Interview engine: the pure session state machine, its timer-driven
//! runner, and the scoring and summary pipeline that fires at completion.

pub mod config;
pub mod machine;
pub mod runner;
pub mod scoring;
pub mod summary;

pub use config::InterviewConfig;
pub use runner::SessionRunner;
