pub mod engine;

pub use engine::{CycleError, CycleOutcome, PollLoop};
