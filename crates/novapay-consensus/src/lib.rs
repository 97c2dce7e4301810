pub mod classic;
pub mod processor;
pub mod quorum;

pub use classic::process_classic;
pub use processor::process;
pub use quorum::{evaluate, total_distinct, QuorumResult};
